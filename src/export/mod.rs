//! Organization member CSV export.
//!
//! Projects each member onto the fixed column tuple
//! `UserName,UserEmail,UserStatus,CreatedDate` and names the file
//! deterministically per calendar day, so repeated exports on the same day
//! overwrite the same stored artifact.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::User;

pub const CONTENT_TYPE: &str = "text/csv; charset=UTF-8";

/// Prefix under which export artifacts are stored in the content store.
pub const STORAGE_PREFIX: &str = "csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub struct MemberExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl MemberExport {
    /// Relative path of the stored artifact, e.g. `csv/users_25_August_2026.csv`.
    pub fn storage_path(&self) -> String {
        format!("{}/{}", STORAGE_PREFIX, self.file_name)
    }
}

/// Deterministic per-day file name: `users_<DD_MonthName_YYYY>.csv`.
pub fn export_file_name(day: NaiveDate) -> String {
    format!("users_{}.csv", day.format("%d_%B_%Y"))
}

/// Serialize the member set for the given calendar day.
pub fn export_members(members: &[User], day: NaiveDate) -> Result<MemberExport, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["UserName", "UserEmail", "UserStatus", "CreatedDate"])?;

    for member in members {
        writer.write_record([
            member.name.as_str(),
            member.email.as_str(),
            member.status.as_str(),
            &member.created_at.format("%Y-%m-%d").to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| ExportError::Csv(e.into_error().into()))?;
    Ok(MemberExport {
        file_name: export_file_name(day),
        bytes,
    })
}
