pub mod config;
pub mod error;
pub mod model;
pub mod parse;
pub mod transform;

use std::path::Path;

use config::ConvertOptions;
use error::ConvertError;
use model::Environment;
use parse::SourceFormat;

/// Read, dereference and convert a Swagger 2.0 / OpenAPI 3.x file.
///
/// The file read is the only suspension point; conversion itself is synchronous.
pub async fn import_file(
    path: impl AsRef<Path>,
    options: &ConvertOptions,
) -> Result<Environment, ConvertError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConvertError::Io {
            path: path.display().to_string(),
            source,
        })?;
    let format = SourceFormat::from_extension(path.extension().and_then(|e| e.to_str()));
    import_str(&content, format, options)
}

/// Convert a document held in memory.
pub fn import_str(
    input: &str,
    format: SourceFormat,
    options: &ConvertOptions,
) -> Result<Environment, ConvertError> {
    let document = parse::parse_document(input, format)?;
    transform::convert_with_options(&document, options)
}
