/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use crate::pipeline::launcher::select_launcher;
use crate::pipeline::launcher::Launcher;
use crate::pipeline::load_environment;
use crate::pipeline::parse_options;
use crate::pipeline::print_options;
use crate::pipeline::print_templates;
use crate::pipeline::JobProcessor;
use crate::pipeline::JobVariant;
use crate::pipeline::Templates;
use std::io::Error;

pub struct DataProcessor {
    pub command: String,
    pub jobs: Vec<String>,
    pub database: String,
    pub templates: Templates,
    pub launcher: Box<dyn Launcher>,
}

impl DataProcessor {
    pub fn new(
        command: &str,
        jobs: Vec<String>,
        database: &str,
        options_string: &str,
        dry_run: bool,
    ) -> Result<Self, Error> {
        load_environment();
        let options = parse_options(options_string)?;
        print_options(command, &options);

        let mut templates = Templates::data();
        templates.apply_options(&options, JobVariant::DATA)?;
        templates.validate()?;
        print_templates(command, &templates);

        if dry_run {
            println!("{}: dry run, no process will be started", command);
        }

        Ok(Self {
            command: command.to_string(),
            jobs,
            database: database.to_string(),
            templates,
            launcher: select_launcher(dry_run),
        })
    }

    pub fn with_launcher(mut self, launcher: Box<dyn Launcher>) -> Self {
        self.launcher = launcher;
        self
    }
}

impl JobProcessor for DataProcessor {
    fn get_command(&self) -> &String {
        &self.command
    }
    fn get_jobs(&self) -> &Vec<String> {
        &self.jobs
    }
    fn get_database(&self) -> &String {
        &self.database
    }
    fn get_templates(&self) -> &Templates {
        &self.templates
    }
    fn get_variant(&self) -> JobVariant {
        JobVariant::DATA
    }
    fn launcher(&mut self) -> &mut dyn Launcher {
        self.launcher.as_mut()
    }
}
