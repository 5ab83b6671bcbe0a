use crate::model::Header;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Build a response's headers: `Content-Type` first, then one empty-valued
/// header per declared response header name.
///
/// The content type is `application/json` unless the declared types exist and
/// none of them is JSON, in which case the first declared type is used.
pub fn build_response_headers<'a>(
    content_types: &[String],
    declared: impl IntoIterator<Item = &'a String>,
) -> Vec<Header> {
    let content_type = match content_types.first() {
        Some(first) if !content_types.iter().any(|ct| ct == JSON_CONTENT_TYPE) => first.as_str(),
        _ => JSON_CONTENT_TYPE,
    };

    std::iter::once(Header::content_type(content_type))
        .chain(declared.into_iter().map(|name| Header::new(name.as_str(), "")))
        .collect()
}
