//! File uploads for compliance documents.
//!
//! Uploading is a two-step flow:
//!
//! 1. [`Files::create_upload`] registers the upload with the API and returns
//!    a [`FileUpload`] carrying a uid and a one-time token.
//! 2. [`Files::upload`] posts the file as multipart form data to the files
//!    host, passing the token in the `x-opp-files-token` header.
//!
//! ```rust,ignore
//! use opp_api::rest::resources::{CreateFileUpload, UploadFile};
//!
//! let upload = client
//!     .files()
//!     .create_upload(CreateFileUpload {
//!         purpose: Some("coc_extract".to_string()),
//!         merchant_uid: Some("mer_123".to_string()),
//!         object_uid: Some("mer_123".to_string()),
//!     })
//!     .await?;
//!
//! let file = UploadFile::new("kvk.pdf", std::fs::read("kvk.pdf")?).mime_type("application/pdf");
//! let uploaded = client.files().upload(&upload, file).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{
    FilePart, HttpMethod, HttpRequest, OppClient, OppError, RequestHost, ValidationError,
};
use crate::rest::input::impl_request_input;
use crate::rest::resources::common;
use crate::rest::{build_path, ListParams, ListResponse, RequestInput};

/// Header carrying the one-time upload token.
pub const FILES_TOKEN_HEADER: &str = "x-opp-files-token";

/// A registered file upload.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct FileUpload {
    /// The file uid (`fil_...`).
    pub uid: String,
    /// Object type name as reported by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    /// When the object was created.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
    /// When the object was last updated.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
    /// When the upload token expires.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub expired: Option<DateTime<Utc>>,
    /// One-time token for [`Files::upload`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// What the document proves, e.g. `coc_extract`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// The merchant uid (`mer_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    /// Uid of the object the document belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_uid: Option<String>,
}

/// Body for registering a file upload.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CreateFileUpload {
    /// What the document proves, e.g. `coc_extract` or `bank_account_bank_statement`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    /// The merchant uid (`mer_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_uid: Option<String>,
    /// The object the document belongs to (merchant, contact, UBO, bank account).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_uid: Option<String>,
}

impl_request_input!(CreateFileUpload);

/// A file stored on the files host.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UploadedFile {
    /// The file uid (`fil_...`).
    pub uid: String,
    /// When the object was created.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
    /// When the object was last updated.
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated: Option<DateTime<Utc>>,
    /// Original file name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Where the stored file can be fetched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// File contents to upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    file_name: String,
    bytes: Vec<u8>,
    mime_type: Option<String>,
}

impl UploadFile {
    /// Creates an upload from a file name and its contents.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime_type: None,
        }
    }

    /// Sets the MIME type of the file.
    #[must_use]
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    fn into_part(self) -> FilePart {
        FilePart {
            field: "file".to_string(),
            file_name: self.file_name,
            bytes: self.bytes,
            mime_type: self.mime_type,
        }
    }
}

/// File operations.
#[derive(Debug, Clone, Copy)]
pub struct Files<'a> {
    client: &'a OppClient,
}

impl<'a> Files<'a> {
    pub(crate) const fn new(client: &'a OppClient) -> Self {
        Self { client }
    }

    /// Registers an upload and returns its token.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn create_upload(
        &self,
        input: impl Into<RequestInput<CreateFileUpload>>,
    ) -> Result<FileUpload, OppError> {
        common::post(self.client, "files", input.into()).await
    }

    /// Uploads the file for a registered upload.
    ///
    /// # Errors
    ///
    /// Returns [`OppError::Validation`] when the upload has no token, and
    /// the dispatched [`OppError`] on failure.
    pub async fn upload(
        &self,
        upload: &FileUpload,
        file: UploadFile,
    ) -> Result<UploadedFile, OppError> {
        let token = upload
            .token
            .as_deref()
            .ok_or_else(|| ValidationError::missing_field("token"))?;
        let path = build_path("uploads/{uid}", &[("uid", upload.uid.as_str())])?;

        let request = HttpRequest::builder(HttpMethod::Post, path)
            .host(RequestHost::Files)
            .header(FILES_TOKEN_HEADER, token)
            .file(file.into_part())
            .build()?;
        self.client.fetch(request).await
    }

    /// Lists registered uploads.
    ///
    /// # Errors
    ///
    /// Returns the dispatched [`OppError`] on failure.
    pub async fn list(&self, params: ListParams) -> Result<ListResponse<FileUpload>, OppError> {
        common::list(self.client, "files", params).await
    }
}
