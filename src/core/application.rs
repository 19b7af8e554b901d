//! Application form. Nothing is uploaded or sent anywhere; files are tracked
//! by name, type and size only.

use crate::utils::error::{FinderError, Result};
use crate::utils::format::format_file_size;
use crate::utils::validation::{validate_email, validate_file_extension, validate_non_empty_string};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use url::Url;

pub const ACCEPTED_EXTENSIONS: [&str; 6] = ["pdf", "doc", "docx", "jpg", "jpeg", "png"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub size: u64,
}

impl UploadedFile {
    /// Reads only filesystem metadata, never the file contents.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| FinderError::Validation {
                message: format!("'{}' is not a file name", path.display()),
            })?
            .to_string();

        Ok(Self {
            mime_type: mime_type_for(&name).to_string(),
            name,
            size: metadata.len(),
        })
    }

    pub fn display_size(&self) -> String {
        format_file_size(self.size)
    }
}

fn mime_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Applicant {
    pub first_name: String,
    pub last_name: String,
    pub chinese_name: String,
    pub email: String,
    pub phone: String,
    pub education: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationForm {
    pub university: Option<String>,
    pub course_id: Option<String>,
    pub applicant: Applicant,
    files: Vec<UploadedFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmittedApplication {
    pub university: Option<String>,
    pub course_id: Option<String>,
    pub applicant: Applicant,
    pub files: Vec<UploadedFile>,
    pub submitted_at: DateTime<Utc>,
}

impl ApplicationForm {
    /// Reads the target from `/apply?university=..&courseId=..`.
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = Url::parse("http://localhost/")?.join(url)?;
        let mut form = Self::default();
        for (key, value) in parsed.query_pairs() {
            match key.as_ref() {
                "university" => form.university = Some(value.into_owned()),
                "courseId" => form.course_id = Some(value.into_owned()),
                _ => {}
            }
        }
        Ok(form)
    }

    /// "申请 <university> - <course>" heading.
    pub fn heading(&self) -> String {
        format!(
            "申请 {} - {}",
            self.university.as_deref().unwrap_or_default(),
            self.course_id.as_deref().unwrap_or_default()
        )
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    /// Attaches the whole batch, or nothing if any file has an unsupported type.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = UploadedFile>) -> Result<()> {
        let batch: Vec<UploadedFile> = files.into_iter().collect();
        for file in &batch {
            validate_file_extension("files", &file.name, &ACCEPTED_EXTENSIONS)?;
        }

        for file in batch {
            tracing::debug!("Attached {} ({})", file.name, file.display_size());
            self.files.push(file);
        }
        Ok(())
    }

    /// Drops every attachment called `name`.
    pub fn remove_file(&mut self, name: &str) {
        self.files.retain(|file| file.name != name);
    }

    fn validate(&self) -> Result<()> {
        let a = &self.applicant;
        for (field, value) in [
            ("first_name", &a.first_name),
            ("last_name", &a.last_name),
            ("chinese_name", &a.chinese_name),
            ("email", &a.email),
            ("phone", &a.phone),
            ("education", &a.education),
        ] {
            validate_non_empty_string(field, value).map_err(|_| FinderError::Validation {
                message: format!("{} is required", field),
            })?;
        }
        validate_email("email", &a.email)
    }

    /// Validates and returns the collected application. No network call.
    pub fn submit(&self) -> Result<SubmittedApplication> {
        self.validate()?;

        let submitted = SubmittedApplication {
            university: self.university.clone(),
            course_id: self.course_id.clone(),
            applicant: self.applicant.clone(),
            files: self.files.clone(),
            submitted_at: Utc::now(),
        };
        tracing::info!(
            "Application submitted for {} with {} file(s)",
            self.heading(),
            submitted.files.len()
        );
        Ok(submitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn filled_form() -> ApplicationForm {
        let mut form =
            ApplicationForm::from_url("/apply?university=Monash%20Malaysia%40IT&courseId=17")
                .unwrap();
        form.applicant = Applicant {
            first_name: "Zhang".to_string(),
            last_name: "Wei".to_string(),
            chinese_name: "张伟".to_string(),
            email: "zhang.wei@example.com".to_string(),
            phone: "+60123456789".to_string(),
            education: "高中".to_string(),
            message: String::new(),
        };
        form
    }

    fn file(name: &str, size: u64) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            mime_type: mime_type_for(name).to_string(),
            size,
        }
    }

    #[test]
    fn test_target_comes_from_url() {
        let form = filled_form();
        assert_eq!(form.university.as_deref(), Some("Monash Malaysia@IT"));
        assert_eq!(form.course_id.as_deref(), Some("17"));
        assert_eq!(form.heading(), "申请 Monash Malaysia@IT - 17");
    }

    #[test]
    fn test_unsupported_attachment_is_rejected() {
        let mut form = filled_form();
        assert!(form.add_files([file("passport.png", 2048)]).is_ok());
        assert!(form.add_files([file("script.exe", 10)]).is_err());
        assert_eq!(form.files().len(), 1);
    }

    #[test]
    fn test_rejected_batch_leaves_form_unchanged() {
        let mut form = filled_form();
        form.add_files([file("passport.png", 2048)]).unwrap();

        let result = form.add_files([
            file("transcript.pdf", 1536),
            file("installer.exe", 10),
            file("photo.jpg", 1024),
        ]);

        assert!(result.is_err());
        assert_eq!(form.files(), &[file("passport.png", 2048)]);
    }

    #[test]
    fn test_remove_file_by_name() {
        let mut form = filled_form();
        form.add_files([
            file("transcript.pdf", 1536),
            file("photo.jpg", 1024),
            file("transcript.pdf", 99),
        ])
        .unwrap();

        form.remove_file("transcript.pdf");
        assert_eq!(form.files(), &[file("photo.jpg", 1024)]);
        assert_eq!(form.files()[0].display_size(), "1 KB");
    }

    #[test]
    fn test_submit_requires_fields() {
        let mut form = filled_form();
        form.applicant.phone = "  ".to_string();
        let err = form.submit().unwrap_err();
        assert!(err.to_string().contains("phone is required"));

        form.applicant.phone = "0123".to_string();
        form.applicant.email = "nope".to_string();
        assert!(form.submit().is_err());
    }

    #[test]
    fn test_submit_returns_summary() {
        let mut form = filled_form();
        form.add_files([file("offer.docx", 4096)]).unwrap();
        let submitted = form.submit().unwrap();
        assert_eq!(submitted.files.len(), 1);
        assert_eq!(submitted.applicant.chinese_name, "张伟");
    }

    #[test]
    fn test_from_path_reads_metadata_only() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("resume.PDF");
        let mut handle = std::fs::File::create(&path).unwrap();
        handle.write_all(&[0u8; 3000]).unwrap();

        let uploaded = UploadedFile::from_path(&path).unwrap();
        assert_eq!(uploaded.name, "resume.PDF");
        assert_eq!(uploaded.mime_type, "application/pdf");
        assert_eq!(uploaded.size, 3000);
        assert_eq!(uploaded.display_size(), "2.93 KB");
    }
}
