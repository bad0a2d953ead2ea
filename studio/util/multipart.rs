/// Minimal `multipart/form-data` reader for the file picker upload.

/// One uploaded file.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub filename: String,
    /// `Content-Type` of the part, lower-cased; empty if the browser sent none.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Returns the index of the first occurrence of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Splits `haystack` on every occurrence of `needle`.
pub fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut result = Vec::new();
    let mut start = 0;
    while start <= haystack.len() {
        if let Some(pos) = find_subsequence(&haystack[start..], needle) {
            result.push(&haystack[start..start + pos]);
            start += pos + needle.len();
        } else {
            result.push(&haystack[start..]);
            break;
        }
    }
    result
}

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(|s| s.trim())
        .find(|s| s.starts_with("boundary="))
        .map(|s| s["boundary=".len()..].trim_matches('"').to_owned())
}

/// Extracts the first file part of a multipart body, headers included.
pub fn extract_file_part(body: &[u8], boundary: &str) -> Option<FilePart> {
    let delimiter = format!("--{}", boundary);

    for part in split_on(body, delimiter.as_bytes()) {
        let sep = b"\r\n\r\n";
        let Some(sep_pos) = find_subsequence(part, sep) else { continue };
        let headers = String::from_utf8_lossy(&part[..sep_pos]);

        let Some(filename) = header_param(&headers, "filename") else { continue };
        let content_type = headers
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.trim().eq_ignore_ascii_case("content-type").then(|| value.trim().to_ascii_lowercase())
            })
            .unwrap_or_default();

        let raw = &part[sep_pos + sep.len()..];
        let bytes = raw.strip_suffix(b"\r\n").unwrap_or(raw).to_vec();
        return Some(FilePart { filename, content_type, bytes });
    }
    None
}

/// Reads `key="value"` from a Content-Disposition header block.
fn header_param(headers: &str, key: &str) -> Option<String> {
    let needle = format!("{}=\"", key);
    let pos = headers.find(&needle)?;
    let rest = &headers[pos + needle.len()..];
    let end = rest.find('"')?;
    Some(rest[..end].to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(boundary: &str, headers: &str, data: &[u8]) -> Vec<u8> {
        let mut out = format!("--{}\r\n{}\r\n\r\n", boundary, headers).into_bytes();
        out.extend_from_slice(data);
        out.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
        out
    }

    #[test]
    fn boundary_is_read_from_content_type() {
        assert_eq!(
            extract_boundary("multipart/form-data; boundary=----WebKitFormBoundaryAbC").as_deref(),
            Some("----WebKitFormBoundaryAbC")
        );
        assert_eq!(extract_boundary("multipart/form-data; boundary=\"q\"").as_deref(), Some("q"));
        assert_eq!(extract_boundary("text/plain"), None);
    }

    #[test]
    fn file_part_keeps_binary_payload_and_metadata() {
        let data = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x00, 0xff];
        let b = body(
            "XyZ",
            "Content-Disposition: form-data; name=\"image_file\"; filename=\"hand.png\"\r\nContent-Type: image/PNG",
            &data,
        );

        let part = extract_file_part(&b, "XyZ").unwrap();
        assert_eq!(part.filename, "hand.png");
        assert_eq!(part.content_type, "image/png");
        assert_eq!(part.bytes, data);
        assert!(part.is_image());
    }

    #[test]
    fn text_fields_are_skipped() {
        let mut b = b"--B\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n".to_vec();
        b.extend(body("B", "Content-Disposition: form-data; name=\"f\"; filename=\"a.txt\"\r\nContent-Type: text/plain", b"hi"));

        let part = extract_file_part(&b, "B").unwrap();
        assert_eq!(part.filename, "a.txt");
        assert!(!part.is_image());
    }

    #[test]
    fn body_without_file_yields_none() {
        let b = b"--B\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--B--\r\n";
        assert_eq!(extract_file_part(b, "B"), None);
    }
}
