/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025
 * Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use crate::pipeline::JobVariant;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io::Error;
use std::io::ErrorKind;

pub static DATA_JOBS: &'static [&'static str] = &["data"];

pub static MC_JOBS: &'static [&'static str] = &["sp1235", "sp1237", "sp1005", "sp998", "sigmc"];

#[derive(Clone, Deserialize)]
#[serde(untagged)]
pub enum JobJsonStructure {
    Suffix(String),
    Entry { suffix: String },
}

impl JobJsonStructure {
    fn into_suffix(self) -> String {
        match self {
            JobJsonStructure::Suffix(suffix) => suffix,
            JobJsonStructure::Entry { suffix } => suffix,
        }
    }
}

pub fn default_jobs(variant: JobVariant) -> Vec<String> {
    let jobs = match variant {
        JobVariant::DATA => DATA_JOBS,
        JobVariant::MC => MC_JOBS,
    };
    jobs.iter().map(|job| job.to_string()).collect()
}

/// `--jobs` and `--jobs-file` are exclusive; with neither the variant's defaults run.
pub fn resolve_jobs(
    jobs: Option<&str>,
    jobs_file: Option<&str>,
    variant: JobVariant,
) -> Result<Vec<String>, Error> {
    match (jobs, jobs_file) {
        (Some(_), Some(_)) => Err(Error::new(
            ErrorKind::InvalidInput,
            "--jobs and --jobs-file cannot be combined",
        )),
        (Some(jobs), None) => Ok(parse_job_list(jobs)),
        (None, Some(jobs_file)) => load_job_file(jobs_file),
        (None, None) => Ok(default_jobs(variant)),
    }
}

pub fn parse_job_list(jobs_string: &str) -> Vec<String> {
    jobs_string
        .split(',')
        .map(|job| job.trim())
        .filter(|job| !job.is_empty())
        .map(|job| job.to_string())
        .collect()
}

pub fn load_job_file(jobs_file: &str) -> Result<Vec<String>, Error> {
    let json_data = fs::read_to_string(jobs_file)?;
    let entries: Vec<JobJsonStructure> = serde_json::from_str(&json_data)
        .map_err(|e| Error::new(ErrorKind::InvalidInput, format!("invalid job file: {}", e)))?;

    if entries.is_empty() {
        return Err(Error::new(ErrorKind::InvalidInput, "no jobs in job file"));
    }

    let mut job_list = Vec::with_capacity(entries.len());
    let mut collision_map = HashMap::new();
    for entry in entries {
        let suffix = entry.into_suffix();
        if suffix.is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput, "empty suffix in job file"));
        }
        if collision_map.insert(suffix.clone(), job_list.len()).is_none() {
            println!("\tjob: [{}]", suffix);
            job_list.push(suffix);
        } else {
            println!("\t{} (duplicate)", suffix);
        }
    }
    Ok(job_list)
}
