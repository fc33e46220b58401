//! Path building for resource operations.
//!
//! Templates use `{name}` placeholders. Identifiers are percent-encoded
//! before interpolation so a uid can never add path segments.
//!
//! # Example
//!
//! ```rust
//! use opp_api::rest::build_path;
//!
//! let path = build_path(
//!     "merchants/{merchant_uid}/bank_accounts/{uid}",
//!     &[("merchant_uid", "mer_1"), ("uid", "bnk_2")],
//! )
//! .unwrap();
//! assert_eq!(path, "merchants/mer_1/bank_accounts/bnk_2");
//! ```

use crate::clients::InvalidHttpRequestError;

/// Builds a path from a template by interpolating identifiers.
///
/// Placeholders without a matching identifier are left untouched.
///
/// # Errors
///
/// Returns [`InvalidHttpRequestError::EmptyPathParameter`] if an identifier
/// is empty or whitespace.
pub fn build_path(
    template: &str,
    ids: &[(&'static str, &str)],
) -> Result<String, InvalidHttpRequestError> {
    let mut path = template.to_string();

    for &(name, value) in ids {
        if value.trim().is_empty() {
            return Err(InvalidHttpRequestError::EmptyPathParameter { name });
        }
        let placeholder = format!("{{{name}}}");
        path = path.replace(&placeholder, &urlencoding::encode(value));
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_path_single_id() {
        assert_eq!(
            build_path("transactions/{uid}", &[("uid", "tra_1")]).unwrap(),
            "transactions/tra_1"
        );
    }

    #[test]
    fn test_build_path_nested_ids() {
        assert_eq!(
            build_path(
                "merchants/{merchant_uid}/settlements/{uid}/specifications",
                &[("merchant_uid", "mer_1"), ("uid", "set_9")],
            )
            .unwrap(),
            "merchants/mer_1/settlements/set_9/specifications"
        );
    }

    #[test]
    fn test_build_path_encodes_identifiers() {
        assert_eq!(
            build_path("merchants/{uid}", &[("uid", "../partners me")]).unwrap(),
            "merchants/..%2Fpartners%20me"
        );
    }

    #[test]
    fn test_build_path_rejects_empty_identifier() {
        let result = build_path("mandates/{uid}", &[("uid", "  ")]);
        assert_eq!(
            result,
            Err(InvalidHttpRequestError::EmptyPathParameter { name: "uid" })
        );
    }

    #[test]
    fn test_build_path_without_placeholders() {
        assert_eq!(build_path("charges", &[]).unwrap(), "charges");
    }
}
