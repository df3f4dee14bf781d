#[must_use]
pub fn detect_mime(data: &[u8]) -> Option<String> {
    infer::get(data).map(|info| info.mime_type().to_string())
}

#[must_use]
pub fn detect_mime_from_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg".into()),
        "png" => Some("image/png".into()),
        "gif" => Some("image/gif".into()),
        "webp" => Some("image/webp".into()),
        "heic" => Some("image/heic".into()),
        _ => None,
    }
}

/// Magic bytes first, then the file extension, then a generic binary type.
#[must_use]
pub fn detect_image_mime(data: &[u8], filename: Option<&str>) -> String {
    detect_mime(data)
        .or_else(|| filename.and_then(detect_mime_from_extension))
        .unwrap_or_else(|| "application/octet-stream".into())
}

#[must_use]
pub fn is_image(mime_type: &str) -> bool {
    mime_type
        .parse::<mime::Mime>()
        .is_ok_and(|parsed| parsed.type_() == mime::IMAGE)
}

/// File extension used when naming an uploaded image.
#[must_use]
pub fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/heic" => "heic",
        _ => "jpg",
    }
}
