//! Presigned-URL detection.
//!
//! A presigned URL authorizes the upload through its own signature; any
//! header the signature does not cover (the API key included) can make the
//! storage service reject the request.

/// Query markers of signed object-storage URLs.
const SIGNATURE_MARKERS: &[&str] = &["X-Goog-Signature", "X-Amz-Signature", "Signature="];

/// Object-storage hosts that only accept signed uploads.
const STORAGE_HOSTS: &[&str] = &["storage.googleapis.com", "amazonaws.com"];

/// True if `url` looks like a presigned object-storage URL.
pub fn is_presigned_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let query = parsed.query().unwrap_or("");
            if SIGNATURE_MARKERS.iter().any(|m| query.contains(m)) {
                return true;
            }
            parsed
                .host_str()
                .map(|host| {
                    let host = host.to_ascii_lowercase();
                    STORAGE_HOSTS.iter().any(|h| host.contains(h))
                })
                .unwrap_or(false)
        }
        Err(_) => {
            tracing::debug!(%url, "upload URL did not parse; falling back to substring check");
            SIGNATURE_MARKERS
                .iter()
                .chain(STORAGE_HOSTS.iter())
                .any(|m| url.contains(m))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amz_signature_is_presigned() {
        assert!(is_presigned_url(
            "https://uploads.example.com/obj?X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Signature=abc123"
        ));
    }

    #[test]
    fn goog_signature_is_presigned() {
        assert!(is_presigned_url(
            "https://cdn.example.com/obj?X-Goog-Algorithm=GOOG4-RSA-SHA256&X-Goog-Signature=ff00"
        ));
    }

    #[test]
    fn generic_signature_param_is_presigned() {
        assert!(is_presigned_url(
            "https://blob.example.com/c/o?Expires=1700000000&Signature=xyz&Key-Pair-Id=K1"
        ));
    }

    #[test]
    fn storage_hosts_are_presigned() {
        assert!(is_presigned_url("https://storage.googleapis.com/bucket/object"));
        assert!(is_presigned_url("https://my-bucket.s3.eu-west-1.amazonaws.com/key"));
    }

    #[test]
    fn api_upload_endpoint_is_not_presigned() {
        assert!(!is_presigned_url(
            "https://acme.celum.cloud/content-api/v1/upload/7f3c?handle=abc"
        ));
    }

    #[test]
    fn unparseable_url_uses_substring_check() {
        assert!(is_presigned_url("relative/path?X-Amz-Signature=1"));
        assert!(!is_presigned_url("relative/path"));
    }
}
