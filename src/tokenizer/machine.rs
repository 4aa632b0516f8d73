//! The state machine itself: one `step_*` method per [`State`] variant,
//! dispatched from [`Tokenizer::next`].

use super::state::{State, TextMode};
use crate::error::ParseErrorKind;
use crate::scan;
use crate::span::Span;
use crate::token::{AttrValue, Quote, TagKind, Token};

#[inline]
fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0C' | b'\r')
}

/// Holds zero, one, or two tokens a single byte transition produced beyond
/// the one `next()` can return directly (spec.md §4.1, §9: "a
/// `deferred_token` slot for the handful of transitions that emit two
/// tokens at once rather than introduce a queue"). A small number of
/// transitions (a missing attribute value right before `>`) produce three
/// logical tokens from one byte, so this holds up to two rather than one;
/// it never grows further, because at most one diagnostic and one
/// attribute/tag token can be pending at once.
#[derive(Debug, Default)]
struct DeferredTokens {
    first: Option<Token>,
    second: Option<Token>,
}

impl DeferredTokens {
    fn push(&mut self, token: Token) {
        if self.first.is_none() {
            self.first = Some(token);
        } else if self.second.is_none() {
            self.second = Some(token);
        } else {
            debug_assert!(false, "deferred token queue overflow");
        }
    }

    fn pop(&mut self) -> Option<Token> {
        let token = self.first.take()?;
        self.first = self.second.take();
        Some(token)
    }
}

/// A streaming HTML5 tokenizer over an immutable byte buffer.
///
/// Holds only a cursor, a state variant, and a handful of in-progress
/// spans (spec.md §4.1, §5: "the tokenizer holds only a small state
/// record... and never allocates"). Construct with [`Tokenizer::new`],
/// then call [`Tokenizer::next`] (or iterate) until it returns `None`.
pub struct Tokenizer<'s> {
    source: &'s [u8],
    pos: u32,
    state: State,
    return_attrs: bool,
    deferred: DeferredTokens,

    text_mode: TextMode,
    end_tag_name_buf: [u8; 16],
    end_tag_name_len: u8,

    tag_start: u32,
    tag_kind: TagKind,
    name_span: Span,

    attr_name_span: Span,
    attr_value_start: u32,

    comment_start: u32,

    doctype_start: u32,
    doctype_name: Option<Span>,
}

impl<'s> Tokenizer<'s> {
    /// Build a tokenizer over `source`, starting in `return_attrs = false`
    /// mode (tags are coalesced, used when building the AST).
    #[must_use]
    pub fn new(source: &'s [u8]) -> Self {
        Tokenizer {
            source,
            pos: 0,
            state: State::Data,
            return_attrs: false,
            deferred: DeferredTokens::default(),
            text_mode: TextMode::Normal,
            end_tag_name_buf: [0; 16],
            end_tag_name_len: 0,
            tag_start: 0,
            tag_kind: TagKind::Start,
            name_span: Span::ZERO,
            attr_name_span: Span::ZERO,
            attr_value_start: 0,
            comment_start: 0,
            doctype_start: 0,
            doctype_name: None,
        }
    }

    /// Build a tokenizer in `return_attrs = true` mode: it emits
    /// `TagName`, then one `Attr` per attribute, then a final `Tag`, for
    /// every tag it scans (spec.md §4.1).
    #[must_use]
    pub fn new_with_return_attrs(source: &'s [u8]) -> Self {
        let mut tokenizer = Self::new(source);
        tokenizer.return_attrs = true;
        tokenizer
    }

    /// Toggle `return_attrs` mode mid-stream. Takes effect from the next
    /// tag onward.
    pub fn set_return_attrs(&mut self, yes: bool) {
        self.return_attrs = yes;
    }

    /// Current byte offset of the cursor.
    #[must_use]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Switch to script-data text mode after a `<script>` start tag.
    pub fn goto_script_data(&mut self) {
        self.set_text_mode(TextMode::ScriptData, b"script");
    }

    /// Switch to raw-text mode after a start tag for `style`, `iframe`,
    /// `xmp`, `noembed`, `noframes`, or `noscript`.
    pub fn goto_raw_text(&mut self, name: &[u8]) {
        self.set_text_mode(TextMode::RawText, name);
    }

    /// Switch to RCDATA mode after a start tag for `textarea` or `title`.
    pub fn goto_rc_data(&mut self, name: &[u8]) {
        self.set_text_mode(TextMode::RcData, name);
    }

    fn set_text_mode(&mut self, mode: TextMode, name: &[u8]) {
        self.text_mode = mode;
        let len = name.len().min(self.end_tag_name_buf.len());
        self.end_tag_name_buf[..len].copy_from_slice(&name[..len]);
        self.end_tag_name_len = len as u8;
    }

    /// Produce the next token, or `None` at end of input.
    pub fn next(&mut self) -> Option<Token> {
        if let Some(token) = self.deferred.pop() {
            return Some(token);
        }
        loop {
            let token = match self.state {
                State::Data => self.step_text(),
                State::TagOpen => self.step_tag_open(),
                State::EndTagOpen => self.step_end_tag_open(),
                State::MarkupDeclarationOpen => self.step_markup_declaration_open(),
                State::TagName => self.step_tag_name(),
                State::SelfClosingStartTag => self.step_self_closing_start_tag(),
                State::BeforeAttributeName => self.step_before_attribute_name(),
                State::AttributeName => self.step_attribute_name(),
                State::AfterAttributeName => self.step_after_attribute_name(),
                State::BeforeAttributeValue => self.step_before_attribute_value(),
                State::AttributeValueDouble => self.step_attribute_value_quoted(Quote::Double),
                State::AttributeValueSingle => self.step_attribute_value_quoted(Quote::Single),
                State::AttributeValueUnquoted => self.step_attribute_value_unquoted(),
                State::AfterAttributeValue => self.step_after_attribute_value(),
                State::BogusComment => self.step_bogus_comment(),
                State::CommentStart => self.step_comment_start(),
                State::Comment => self.step_comment(),
                State::CommentEndDash => self.step_comment_end_dash(),
                State::CommentEnd => self.step_comment_end(),
                State::Doctype => self.step_doctype(),
                State::BeforeDoctypeName => self.step_before_doctype_name(),
                State::DoctypeName => self.step_doctype_name(),
                State::AfterDoctypeName => self.step_after_doctype_name(),
                State::Eof => return None,
            };
            if token.is_some() {
                return token;
            }
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos as usize).copied()
    }

    #[inline]
    fn error(&self, kind: ParseErrorKind, span: Span) -> Token {
        Token::ParseError { kind, span }
    }

    fn finish_tag(&mut self) -> Token {
        Token::Tag {
            kind: self.tag_kind,
            span: Span::new(self.tag_start, self.pos),
            name: self.name_span,
        }
    }

    fn finish_attribute(&self, value: Option<AttrValue>) -> Option<Token> {
        if self.return_attrs {
            Some(Token::Attr {
                name: self.attr_name_span,
                value,
            })
        } else {
            None
        }
    }

    /// An attribute and the tag itself both complete on the same byte
    /// (`name=value>` or a bare `name>`): emit the attribute (if
    /// `return_attrs`) now and queue the tag, or just emit the tag.
    fn finish_attribute_and_tag(&mut self, value: Option<AttrValue>) -> Option<Token> {
        let tag = self.finish_tag();
        match self.finish_attribute(value) {
            Some(attr) => {
                self.deferred.push(tag);
                Some(attr)
            }
            None => Some(tag),
        }
    }

    fn begin_attribute(&mut self) {
        self.attr_name_span = Span::new(self.pos, self.pos);
    }

    // ---- text / data ----------------------------------------------------

    fn step_text(&mut self) -> Option<Token> {
        let start = self.pos;
        loop {
            match self.peek() {
                None => {
                    self.state = State::Eof;
                    return self.finish_text(start, self.pos);
                }
                Some(b'<') => {
                    if self.text_mode == TextMode::Normal || self.matches_end_tag_here() {
                        self.text_mode = TextMode::Normal;
                        self.state = State::TagOpen;
                        return self.finish_text(start, self.pos);
                    }
                    self.pos += 1;
                }
                Some(0) => {
                    let text = self.finish_text(start, self.pos);
                    let err = self.error(ParseErrorKind::UnexpectedNullCharacter, Span::new(self.pos, self.pos + 1));
                    self.pos += 1;
                    return match text {
                        Some(t) => {
                            self.deferred.push(err);
                            Some(t)
                        }
                        None => Some(err),
                    };
                }
                Some(_) => {
                    let rest = &self.source[self.pos as usize..];
                    let lt = scan::find_byte(rest, b'<').unwrap_or(rest.len());
                    let nul = scan::find_byte(rest, 0).unwrap_or(rest.len());
                    self.pos += lt.min(nul).max(1) as u32;
                }
            }
        }
    }

    fn finish_text(&mut self, start: u32, end: u32) -> Option<Token> {
        if start == end {
            return None;
        }
        let bytes = &self.source[start as usize..end as usize];
        if bytes.iter().all(|&b| is_ws(b)) {
            return None;
        }
        let mut trimmed_end = end;
        while trimmed_end > start && is_ws(self.source[(trimmed_end - 1) as usize]) {
            trimmed_end -= 1;
        }
        Some(Token::Text {
            span: Span::new(start, trimmed_end),
        })
    }

    fn matches_end_tag_here(&self) -> bool {
        let name_len = self.end_tag_name_len as usize;
        let rest = &self.source[self.pos as usize..];
        if rest.len() < 2 + name_len || rest[0] != b'<' || rest[1] != b'/' {
            return false;
        }
        let candidate = &rest[2..2 + name_len];
        if !candidate.eq_ignore_ascii_case(&self.end_tag_name_buf[..name_len]) {
            return false;
        }
        match rest.get(2 + name_len) {
            None => true,
            Some(&b) => b == b'>' || b == b'/' || is_ws(b),
        }
    }

    // ---- tag open ---------------------------------------------------------

    fn step_tag_open(&mut self) -> Option<Token> {
        let tag_start = self.pos;
        self.pos += 1; // consume '<'
        match self.peek() {
            Some(b'!') => {
                self.pos += 1;
                self.tag_start = tag_start;
                self.state = State::MarkupDeclarationOpen;
                None
            }
            Some(b'/') => {
                self.pos += 1;
                self.tag_start = tag_start;
                self.state = State::EndTagOpen;
                None
            }
            Some(b) if b.is_ascii_alphabetic() => {
                self.tag_start = tag_start;
                self.tag_kind = TagKind::Start;
                self.name_span = Span::new(self.pos, self.pos);
                self.state = State::TagName;
                None
            }
            None => {
                self.state = State::Eof;
                Some(self.error(
                    ParseErrorKind::EofBeforeTagName,
                    Span::new(tag_start, self.pos),
                ))
            }
            Some(_) => {
                // Invalid first character of a tag name: give up on this
                // tag and resume scanning text right after the `<`.
                self.state = State::Data;
                Some(self.error(
                    ParseErrorKind::InvalidFirstCharacterOfTagName,
                    Span::new(tag_start, self.pos + 1),
                ))
            }
        }
    }

    fn step_end_tag_open(&mut self) -> Option<Token> {
        match self.peek() {
            Some(b) if b.is_ascii_alphabetic() => {
                self.tag_kind = TagKind::End;
                self.name_span = Span::new(self.pos, self.pos);
                self.state = State::TagName;
                None
            }
            Some(b'>') => {
                self.pos += 1;
                self.state = State::Data;
                Some(self.error(
                    ParseErrorKind::MissingEndTagName,
                    Span::new(self.tag_start, self.pos),
                ))
            }
            None => {
                self.state = State::Eof;
                Some(self.error(
                    ParseErrorKind::EofBeforeTagName,
                    Span::new(self.tag_start, self.pos),
                ))
            }
            Some(_) => {
                self.comment_start = self.tag_start;
                self.state = State::BogusComment;
                None
            }
        }
    }

    fn step_markup_declaration_open(&mut self) -> Option<Token> {
        let rest = &self.source[self.pos as usize..];
        if rest.starts_with(b"--") {
            self.pos += 2;
            self.comment_start = self.tag_start;
            self.state = State::CommentStart;
            None
        } else if rest.len() >= 7 && rest[..7].eq_ignore_ascii_case(b"doctype") {
            self.pos += 7;
            self.doctype_start = self.tag_start;
            self.doctype_name = None;
            self.state = State::Doctype;
            None
        } else {
            self.comment_start = self.tag_start;
            self.state = State::BogusComment;
            Some(self.error(
                ParseErrorKind::IncorrectlyOpenedComment,
                Span::new(self.tag_start, self.pos),
            ))
        }
    }

    fn step_tag_name(&mut self) -> Option<Token> {
        loop {
            match self.peek() {
                None => {
                    self.state = State::Eof;
                    return Some(self.error(ParseErrorKind::EofInTag, Span::new(self.tag_start, self.pos)));
                }
                Some(b) if is_ws(b) => {
                    self.name_span.end = self.pos;
                    self.pos += 1;
                    self.state = State::BeforeAttributeName;
                    return self.emit_tag_name_if_wanted();
                }
                Some(b'/') => {
                    self.name_span.end = self.pos;
                    self.pos += 1;
                    self.state = State::SelfClosingStartTag;
                    return self.emit_tag_name_if_wanted();
                }
                Some(b'>') => {
                    self.name_span.end = self.pos;
                    self.pos += 1;
                    self.state = State::Data;
                    if self.return_attrs {
                        let tag = self.finish_tag();
                        self.deferred.push(tag);
                        return Some(Token::TagName { name: self.name_span });
                    }
                    return Some(self.finish_tag());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn emit_tag_name_if_wanted(&self) -> Option<Token> {
        if self.return_attrs {
            Some(Token::TagName { name: self.name_span })
        } else {
            None
        }
    }

    fn step_self_closing_start_tag(&mut self) -> Option<Token> {
        match self.peek() {
            Some(b'>') => {
                self.pos += 1;
                self.tag_kind = match self.tag_kind {
                    TagKind::Start => TagKind::StartSelf,
                    TagKind::End => TagKind::EndSelf,
                    other => other,
                };
                self.state = State::Data;
                Some(self.finish_tag())
            }
            None => {
                self.state = State::Eof;
                Some(self.error(ParseErrorKind::EofInTag, Span::new(self.tag_start, self.pos)))
            }
            Some(_) => {
                self.state = State::BeforeAttributeName;
                Some(self.error(
                    ParseErrorKind::UnexpectedSolidusInTag,
                    Span::new(self.pos - 1, self.pos),
                ))
            }
        }
    }

    // ---- attributes ---------------------------------------------------

    fn step_before_attribute_name(&mut self) -> Option<Token> {
        loop {
            match self.peek() {
                None => {
                    self.state = State::Eof;
                    return Some(self.error(ParseErrorKind::EofInTag, Span::new(self.tag_start, self.pos)));
                }
                Some(b) if is_ws(b) => self.pos += 1,
                Some(b'/') => {
                    self.pos += 1;
                    self.state = State::SelfClosingStartTag;
                    return None;
                }
                Some(b'>') => {
                    self.pos += 1;
                    self.state = State::Data;
                    return Some(self.finish_tag());
                }
                Some(b'=') => {
                    let err_span = Span::new(self.pos, self.pos + 1);
                    self.begin_attribute();
                    self.pos += 1;
                    self.state = State::AttributeName;
                    return Some(self.error(
                        ParseErrorKind::UnexpectedEqualsSignBeforeAttributeName,
                        err_span,
                    ));
                }
                Some(_) => {
                    self.begin_attribute();
                    self.state = State::AttributeName;
                    return None;
                }
            }
        }
    }

    fn step_attribute_name(&mut self) -> Option<Token> {
        loop {
            match self.peek() {
                None => {
                    self.attr_name_span.end = self.pos;
                    self.state = State::Eof;
                    return Some(self.error(ParseErrorKind::EofInTag, Span::new(self.tag_start, self.pos)));
                }
                Some(b) if is_ws(b) => {
                    self.attr_name_span.end = self.pos;
                    self.pos += 1;
                    self.state = State::AfterAttributeName;
                    return None;
                }
                Some(b'=') => {
                    self.attr_name_span.end = self.pos;
                    self.pos += 1;
                    self.state = State::BeforeAttributeValue;
                    return None;
                }
                Some(b'/') => {
                    self.attr_name_span.end = self.pos;
                    self.pos += 1;
                    self.state = State::SelfClosingStartTag;
                    return self.finish_attribute(None);
                }
                Some(b'>') => {
                    self.attr_name_span.end = self.pos;
                    self.pos += 1;
                    self.state = State::Data;
                    return self.finish_attribute_and_tag(None);
                }
                Some(b) if b == b'"' || b == b'\'' || b == b'<' => {
                    self.pos += 1;
                    return Some(self.error(
                        ParseErrorKind::UnexpectedCharacterInAttributeName,
                        Span::new(self.pos - 1, self.pos),
                    ));
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn step_after_attribute_name(&mut self) -> Option<Token> {
        loop {
            match self.peek() {
                None => {
                    self.state = State::Eof;
                    return Some(self.error(ParseErrorKind::EofInTag, Span::new(self.tag_start, self.pos)));
                }
                Some(b) if is_ws(b) => self.pos += 1,
                Some(b'/') => {
                    self.pos += 1;
                    self.state = State::SelfClosingStartTag;
                    return self.finish_attribute(None);
                }
                Some(b'=') => {
                    self.pos += 1;
                    self.state = State::BeforeAttributeValue;
                    return None;
                }
                Some(b'>') => {
                    self.pos += 1;
                    self.state = State::Data;
                    return self.finish_attribute_and_tag(None);
                }
                Some(_) => {
                    let prev = self.finish_attribute(None);
                    if let Some(tok) = prev {
                        self.begin_attribute();
                        self.state = State::AttributeName;
                        return Some(tok);
                    }
                    self.begin_attribute();
                    self.state = State::AttributeName;
                    return None;
                }
            }
        }
    }

    fn step_before_attribute_value(&mut self) -> Option<Token> {
        loop {
            match self.peek() {
                None => {
                    self.state = State::Eof;
                    return Some(self.error(
                        ParseErrorKind::EofInAttributeValue,
                        Span::new(self.tag_start, self.pos),
                    ));
                }
                Some(b) if is_ws(b) => self.pos += 1,
                Some(b'"') => {
                    self.pos += 1;
                    self.attr_value_start = self.pos;
                    self.state = State::AttributeValueDouble;
                    return None;
                }
                Some(b'\'') => {
                    self.pos += 1;
                    self.attr_value_start = self.pos;
                    self.state = State::AttributeValueSingle;
                    return None;
                }
                Some(b'>') => {
                    let err_span = Span::new(self.pos, self.pos + 1);
                    self.pos += 1;
                    self.state = State::Data;
                    let tag = self.finish_tag();
                    if let Some(attr) = self.finish_attribute(None) {
                        self.deferred.push(attr);
                    }
                    self.deferred.push(tag);
                    return Some(self.error(ParseErrorKind::MissingAttributeValue, err_span));
                }
                Some(_) => {
                    self.attr_value_start = self.pos;
                    self.state = State::AttributeValueUnquoted;
                    return None;
                }
            }
        }
    }

    fn step_attribute_value_quoted(&mut self, quote: Quote) -> Option<Token> {
        let q = match quote {
            Quote::Double => b'"',
            Quote::Single => b'\'',
            Quote::None => unreachable!("quoted state always carries a quote character"),
        };
        loop {
            match self.peek() {
                None => {
                    self.state = State::Eof;
                    return Some(self.error(
                        ParseErrorKind::EofInAttributeValue,
                        Span::new(self.tag_start, self.pos),
                    ));
                }
                Some(b) if b == q => {
                    let value = AttrValue {
                        span: Span::new(self.attr_value_start, self.pos),
                        quote,
                    };
                    self.pos += 1;
                    self.state = State::AfterAttributeValue;
                    return self.finish_attribute(Some(value));
                }
                Some(0) => {
                    let err = self.error(ParseErrorKind::UnexpectedNullCharacter, Span::new(self.pos, self.pos + 1));
                    self.pos += 1;
                    return Some(err);
                }
                Some(_) => {
                    let rest = &self.source[self.pos as usize..];
                    let close = scan::find_byte(rest, q).unwrap_or(rest.len());
                    let nul = scan::find_byte(rest, 0).unwrap_or(rest.len());
                    self.pos += close.min(nul).max(1) as u32;
                }
            }
        }
    }

    fn step_attribute_value_unquoted(&mut self) -> Option<Token> {
        loop {
            match self.peek() {
                None => {
                    self.state = State::Eof;
                    return Some(self.error(
                        ParseErrorKind::EofInAttributeValue,
                        Span::new(self.tag_start, self.pos),
                    ));
                }
                Some(b) if is_ws(b) => {
                    let value = AttrValue {
                        span: Span::new(self.attr_value_start, self.pos),
                        quote: Quote::None,
                    };
                    self.pos += 1;
                    self.state = State::BeforeAttributeName;
                    return self.finish_attribute(Some(value));
                }
                Some(b'>') => {
                    let value = AttrValue {
                        span: Span::new(self.attr_value_start, self.pos),
                        quote: Quote::None,
                    };
                    self.pos += 1;
                    self.state = State::Data;
                    return self.finish_attribute_and_tag(Some(value));
                }
                Some(b) if matches!(b, b'"' | b'\'' | b'<' | b'=' | b'`') => {
                    self.pos += 1;
                    return Some(self.error(
                        ParseErrorKind::UnexpectedCharacterInUnquotedAttributeValue,
                        Span::new(self.pos - 1, self.pos),
                    ));
                }
                Some(0) => {
                    let err = self.error(ParseErrorKind::UnexpectedNullCharacter, Span::new(self.pos, self.pos + 1));
                    self.pos += 1;
                    return Some(err);
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn step_after_attribute_value(&mut self) -> Option<Token> {
        match self.peek() {
            None => {
                self.state = State::Eof;
                Some(self.error(ParseErrorKind::EofInTag, Span::new(self.tag_start, self.pos)))
            }
            Some(b) if is_ws(b) => {
                self.pos += 1;
                self.state = State::BeforeAttributeName;
                None
            }
            Some(b'/') => {
                self.pos += 1;
                self.state = State::SelfClosingStartTag;
                None
            }
            Some(b'>') => {
                self.pos += 1;
                self.state = State::Data;
                Some(self.finish_tag())
            }
            Some(_) => {
                self.state = State::BeforeAttributeName;
                Some(self.error(
                    ParseErrorKind::MissingWhitespaceBetweenAttributes,
                    Span::new(self.pos, self.pos),
                ))
            }
        }
    }

    // ---- comments -------------------------------------------------------

    fn step_bogus_comment(&mut self) -> Option<Token> {
        loop {
            match self.peek() {
                None => {
                    self.state = State::Eof;
                    return Some(Token::Comment {
                        span: Span::new(self.comment_start, self.pos),
                    });
                }
                Some(b'>') => {
                    self.pos += 1;
                    self.state = State::Data;
                    return Some(Token::Comment {
                        span: Span::new(self.comment_start, self.pos),
                    });
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn step_comment_start(&mut self) -> Option<Token> {
        if self.peek() == Some(b'>') {
            self.pos += 1;
            self.state = State::Data;
            return Some(self.error(
                ParseErrorKind::AbruptClosingOfEmptyComment,
                Span::new(self.comment_start, self.pos),
            ));
        }
        self.state = State::Comment;
        None
    }

    fn step_comment(&mut self) -> Option<Token> {
        loop {
            match self.peek() {
                None => {
                    self.state = State::Eof;
                    return Some(self.error(ParseErrorKind::EofInComment, Span::new(self.comment_start, self.pos)));
                }
                Some(b'-') => {
                    self.pos += 1;
                    self.state = State::CommentEndDash;
                    return None;
                }
                Some(0) => {
                    let err = self.error(ParseErrorKind::UnexpectedNullCharacter, Span::new(self.pos, self.pos + 1));
                    self.pos += 1;
                    return Some(err);
                }
                Some(_) => {
                    let rest = &self.source[self.pos as usize..];
                    let dash = scan::find_byte(rest, b'-').unwrap_or(rest.len());
                    let nul = scan::find_byte(rest, 0).unwrap_or(rest.len());
                    self.pos += dash.min(nul).max(1) as u32;
                }
            }
        }
    }

    fn step_comment_end_dash(&mut self) -> Option<Token> {
        match self.peek() {
            None => {
                self.state = State::Eof;
                Some(self.error(ParseErrorKind::EofInComment, Span::new(self.comment_start, self.pos)))
            }
            Some(b'-') => {
                self.pos += 1;
                self.state = State::CommentEnd;
                None
            }
            Some(_) => {
                self.state = State::Comment;
                None
            }
        }
    }

    fn step_comment_end(&mut self) -> Option<Token> {
        match self.peek() {
            None => {
                self.state = State::Eof;
                Some(self.error(ParseErrorKind::EofInComment, Span::new(self.comment_start, self.pos)))
            }
            Some(b'>') => {
                self.pos += 1;
                self.state = State::Data;
                Some(Token::Comment {
                    span: Span::new(self.comment_start, self.pos),
                })
            }
            Some(b'-') => {
                self.pos += 1;
                None
            }
            Some(_) => {
                self.state = State::Comment;
                None
            }
        }
    }

    // ---- doctype --------------------------------------------------------

    fn step_doctype(&mut self) -> Option<Token> {
        match self.peek() {
            Some(b) if is_ws(b) => {
                self.pos += 1;
                self.state = State::BeforeDoctypeName;
                None
            }
            Some(b'>') => {
                let err_span = Span::new(self.pos, self.pos + 1);
                self.pos += 1;
                self.state = State::Data;
                self.deferred.push(Token::Doctype {
                    span: Span::new(self.doctype_start, self.pos),
                    name: None,
                    extra: None,
                });
                Some(self.error(ParseErrorKind::MissingWhitespaceBeforeDoctypeName, err_span))
            }
            None => {
                self.state = State::Eof;
                Some(self.error(ParseErrorKind::EofInDoctype, Span::new(self.doctype_start, self.pos)))
            }
            Some(_) => {
                let err_span = Span::new(self.pos, self.pos);
                self.state = State::BeforeDoctypeName;
                Some(self.error(ParseErrorKind::MissingWhitespaceBeforeDoctypeName, err_span))
            }
        }
    }

    fn step_before_doctype_name(&mut self) -> Option<Token> {
        loop {
            match self.peek() {
                Some(b) if is_ws(b) => self.pos += 1,
                Some(b'>') => {
                    self.pos += 1;
                    self.state = State::Data;
                    return Some(Token::Doctype {
                        span: Span::new(self.doctype_start, self.pos),
                        name: None,
                        extra: None,
                    });
                }
                None => {
                    self.state = State::Eof;
                    return Some(self.error(ParseErrorKind::EofInDoctype, Span::new(self.doctype_start, self.pos)));
                }
                Some(_) => {
                    self.doctype_name = Some(Span::new(self.pos, self.pos));
                    self.state = State::DoctypeName;
                    return None;
                }
            }
        }
    }

    fn step_doctype_name(&mut self) -> Option<Token> {
        loop {
            match self.peek() {
                Some(b) if is_ws(b) => {
                    if let Some(n) = &mut self.doctype_name {
                        n.end = self.pos;
                    }
                    self.pos += 1;
                    self.state = State::AfterDoctypeName;
                    return None;
                }
                Some(b'>') => {
                    if let Some(n) = &mut self.doctype_name {
                        n.end = self.pos;
                    }
                    self.pos += 1;
                    self.state = State::Data;
                    return Some(Token::Doctype {
                        span: Span::new(self.doctype_start, self.pos),
                        name: self.doctype_name,
                        extra: None,
                    });
                }
                None => {
                    if let Some(n) = &mut self.doctype_name {
                        n.end = self.pos;
                    }
                    self.state = State::Eof;
                    return Some(self.error(ParseErrorKind::EofInDoctype, Span::new(self.doctype_start, self.pos)));
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn step_after_doctype_name(&mut self) -> Option<Token> {
        let extra_start = self.pos;
        loop {
            match self.peek() {
                Some(b'>') => {
                    let extra = (self.pos > extra_start).then(|| Span::new(extra_start, self.pos));
                    self.pos += 1;
                    self.state = State::Data;
                    return Some(Token::Doctype {
                        span: Span::new(self.doctype_start, self.pos),
                        name: self.doctype_name,
                        extra,
                    });
                }
                None => {
                    self.state = State::Eof;
                    return Some(self.error(ParseErrorKind::EofInDoctype, Span::new(self.doctype_start, self.pos)));
                }
                Some(_) => self.pos += 1,
            }
        }
    }
}

impl<'s> Iterator for Tokenizer<'s> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        Tokenizer::next(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TagKind;
    use pretty_assertions::assert_eq;

    fn tokens(source: &[u8]) -> Vec<Token> {
        Tokenizer::new(source).collect()
    }

    #[test]
    fn simple_element() {
        let toks = tokens(b"<p>hi</p>");
        assert_eq!(
            toks,
            vec![
                Token::Tag {
                    kind: TagKind::Start,
                    span: Span::new(0, 3),
                    name: Span::new(1, 2),
                },
                Token::Text {
                    span: Span::new(3, 5),
                },
                Token::Tag {
                    kind: TagKind::End,
                    span: Span::new(5, 9),
                    name: Span::new(7, 8),
                },
            ]
        );
    }

    #[test]
    fn whitespace_only_text_is_suppressed() {
        let toks = tokens(b"<div>\n  <p>x</p></div>");
        assert!(toks
            .iter()
            .filter(|t| matches!(t, Token::Text { .. }))
            .all(|t| t.span().len() > 0));
        assert_eq!(
            toks.iter()
                .filter(|t| matches!(t, Token::Text { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn trailing_whitespace_is_trimmed_from_text_span() {
        let src = b"<p>hi   </p>";
        let toks = tokens(src);
        let text = toks
            .iter()
            .find_map(|t| match t {
                Token::Text { span } => Some(*span),
                _ => None,
            })
            .unwrap();
        assert_eq!(text.slice(src), b"hi");
    }

    #[test]
    fn null_byte_in_text_is_reported_and_does_not_break_the_run() {
        let src = b"<p>a\0b</p>";
        let toks = tokens(src);
        let errs: Vec<_> = toks.iter().filter(|t| matches!(t, Token::ParseError { kind: ParseErrorKind::UnexpectedNullCharacter, .. })).collect();
        assert_eq!(errs.len(), 1);
        let text_spans: Vec<&[u8]> = toks
            .iter()
            .filter_map(|t| match t {
                Token::Text { span } => Some(span.slice(src)),
                _ => None,
            })
            .collect();
        assert_eq!(text_spans, vec![b"a".as_slice(), b"b".as_slice()]);
    }

    #[test]
    fn null_byte_in_quoted_attribute_value_is_reported() {
        let src = b"<div id=\"a\0b\">";
        let toks: Vec<_> = Tokenizer::new_with_return_attrs(src).collect();
        assert!(toks.iter().any(|t| matches!(t, Token::ParseError { kind: ParseErrorKind::UnexpectedNullCharacter, .. })));
        let value = toks
            .iter()
            .find_map(|t| match t {
                Token::Attr { value: Some(v), .. } => Some(v.span),
                _ => None,
            })
            .unwrap();
        assert_eq!(value.slice(src), b"a\0b");
    }

    #[test]
    fn void_self_closing_tag() {
        let toks = tokens(b"<br/>");
        assert_eq!(
            toks,
            vec![Token::Tag {
                kind: TagKind::StartSelf,
                span: Span::new(0, 5),
                name: Span::new(1, 3),
            }]
        );
    }

    #[test]
    fn comment_round_trip_span() {
        let src = b"<!-- hi -->";
        let toks = tokens(src);
        assert_eq!(
            toks,
            vec![Token::Comment {
                span: Span::new(0, src.len() as u32)
            }]
        );
    }

    #[test]
    fn abrupt_closing_of_empty_comment() {
        let toks = tokens(b"<!-->");
        assert_eq!(
            toks,
            vec![Token::ParseError {
                kind: ParseErrorKind::AbruptClosingOfEmptyComment,
                span: Span::new(0, 5),
            }]
        );
    }

    #[test]
    fn doctype_name_and_extra() {
        let src = b"<!doctype HTML PUBLIC \"x\">";
        let toks = tokens(src);
        match &toks[0] {
            Token::Doctype { name, extra, .. } => {
                assert_eq!(name.unwrap().slice(src), b"HTML");
                assert!(extra.is_some());
            }
            other => panic!("expected doctype, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_attribute_names_are_both_emitted() {
        // dedup is the validator's job (spec.md §4.4), not the tokenizer's
        let toks: Vec<_> = Tokenizer::new_with_return_attrs(br#"<div id="a" id="b">"#).collect();
        let attr_names: Vec<&[u8]> = toks
            .iter()
            .filter_map(|t| match t {
                Token::Attr { name, .. } => Some(name.slice(br#"<div id="a" id="b">"#)),
                _ => None,
            })
            .collect();
        assert_eq!(attr_names, vec![b"id".as_slice(), b"id".as_slice()]);
    }

    #[test]
    fn return_attrs_mode_emits_name_then_attrs_then_tag() {
        let src = br#"<a href="x" class="y">"#;
        let toks: Vec<_> = Tokenizer::new_with_return_attrs(src).collect();
        assert!(matches!(toks[0], Token::TagName { .. }));
        assert!(matches!(toks[1], Token::Attr { .. }));
        assert!(matches!(toks[2], Token::Attr { .. }));
        assert!(matches!(toks[3], Token::Tag { .. }));
    }

    #[test]
    fn missing_attribute_value_before_gt() {
        let toks: Vec<_> = Tokenizer::new(b"<div a=>").collect();
        assert!(toks
            .iter()
            .any(|t| matches!(t, Token::ParseError { kind: ParseErrorKind::MissingAttributeValue, .. })));
        assert!(toks.iter().any(|t| matches!(t, Token::Tag { .. })));
    }

    #[test]
    fn raw_text_mode_swallows_markup_until_matching_end_tag() {
        let src = b"<style>a <b> c</style>after";
        let mut tok = Tokenizer::new(src);
        let first = tok.next().unwrap();
        assert!(matches!(first, Token::Tag { kind: TagKind::Start, .. }));
        tok.goto_raw_text(b"style");
        let rest: Vec<_> = std::iter::from_fn(|| tok.next()).collect();
        let text = rest
            .iter()
            .find_map(|t| match t {
                Token::Text { span } => Some(*span),
                _ => None,
            })
            .unwrap();
        assert_eq!(text.slice(src), b"a <b> c");
        assert!(rest.iter().any(|t| matches!(t, Token::Tag { kind: TagKind::End, .. })));
    }

    #[test]
    fn eof_in_tag_is_reported() {
        let toks = tokens(b"<div id=");
        assert!(toks
            .iter()
            .any(|t| matches!(t, Token::ParseError { kind: ParseErrorKind::EofInAttributeValue, .. })
                || matches!(t, Token::ParseError { kind: ParseErrorKind::EofInTag, .. })));
    }
}
