//! The tokenizer's state variant (spec.md §4.1).

/// Which text-content sub-mode the tokenizer is reading in.
///
/// The tokenizer never enters these on its own; the caller (the AST
/// builder, C3) switches into them after a start tag whose element
/// demands it, via [`super::Tokenizer::goto_raw_text`],
/// [`super::Tokenizer::goto_rc_data`] or
/// [`super::Tokenizer::goto_script_data`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TextMode {
    /// Ordinary text: markup is recognized, entities are opaque.
    Normal,
    /// `<textarea>`/`<title>`: markup-free except for the matching end tag.
    RcData,
    /// `<style>`/`<iframe>`/`<xmp>`/`<noembed>`/`<noframes>`/`<noscript>`:
    /// markup-free except for the matching end tag.
    RawText,
    /// `<script>`: markup-free except for the matching end tag.
    ///
    /// The script-data-double-escape transitions are recognized only at
    /// design-level granularity (spec.md §9, Open Question (b)): this
    /// crate does not distinguish "inside a double-escaped script
    /// comment" from ordinary script text, it only looks for the matching
    /// `</script>`.
    ScriptData,
}

/// The tokenizer's internal state, one variant per labeled state in
/// spec.md §4.1.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    /// Ordinary text / the content-sensitive text modes (`TextMode`
    /// distinguishes among them).
    Data,
    /// Just consumed `<`.
    TagOpen,
    /// Just consumed `</`.
    EndTagOpen,
    /// Just consumed `<!`.
    MarkupDeclarationOpen,
    /// Scanning a start/end tag's name.
    TagName,
    /// Just consumed `/` inside a tag, before the expected `>`.
    SelfClosingStartTag,
    /// Between attributes, or at the start of the first one.
    BeforeAttributeName,
    /// Scanning an attribute name.
    AttributeName,
    /// Just finished an attribute name, before `=` or the next attribute.
    AfterAttributeName,
    /// Just consumed `=`, before the attribute value.
    BeforeAttributeValue,
    /// Scanning a double-quoted attribute value.
    AttributeValueDouble,
    /// Scanning a single-quoted attribute value.
    AttributeValueSingle,
    /// Scanning an unquoted attribute value.
    AttributeValueUnquoted,
    /// Just finished an attribute value, before whitespace or `>`.
    AfterAttributeValue,
    /// A comment-like construct that isn't a well-formed comment
    /// (`<!wat>`, `<?wat>`, `</1>`): read verbatim up to `>`.
    BogusComment,
    /// Just consumed `<!--`.
    CommentStart,
    /// Inside a comment's body.
    Comment,
    /// Just consumed one `-` while looking for `-->`.
    CommentEndDash,
    /// Just consumed `--` while looking for `-->`.
    CommentEnd,
    /// Just consumed `<!doctype` (case-insensitive).
    Doctype,
    /// Between `doctype` and the name.
    BeforeDoctypeName,
    /// Scanning the doctype name.
    DoctypeName,
    /// After the doctype name, reading up to `>` as opaque `extra`.
    AfterDoctypeName,
    /// Terminal: source exhausted.
    Eof,
}
