// Source text acquisition: uploaded documents and job-posting pages.
// Both paths are best effort and degrade to empty text instead of failing.

pub mod document;
pub mod job_posting;
