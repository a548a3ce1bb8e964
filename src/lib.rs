/*!
 *  Galileo Network Analytics (GNA) Toolkit
 *
 *  Copyright 2024 Fidelis Farm & Technologies, LLC
 *  All Rights Reserved.
 *  See license information in LICENSE.
 */

pub mod utils {
    pub mod template;
}

pub mod pipeline {
    use crate::utils::template::format_template;
    use crate::utils::template::validate_template;
    use chrono::DateTime;
    use chrono::Local;
    use dotenv::dotenv;
    use std::collections::BTreeMap;
    use std::env;
    use std::fmt;
    use std::io::Error;
    use std::io::ErrorKind;
    use std::time::Duration;
    use std::time::Instant;

    pub mod data;
    pub mod jobs;
    pub mod launcher;
    pub mod mc;

    #[cfg(test)]
    mod data_test;
    #[cfg(test)]
    mod jobs_test;
    #[cfg(test)]
    mod launcher_test;
    #[cfg(test)]
    mod mc_test;
    #[cfg(test)]
    mod pipeline_test;

    use launcher::Launcher;

    pub const DEFAULT_DATABASE: &str = "bdtaunuhad_lite";
    pub const DEFAULT_PSQL: &str = "psql";
    pub const DEFAULT_MCGRAPH_EXE: &str = "../extract_mcgraph";
    pub const DEFAULT_MCGRAPH_CFG: &str = "extract_mcgraph_{0}.cfg";
    pub const DEFAULT_RECOGRAPH_EXE: &str = "../extract_recograph";
    pub const DEFAULT_RECOGRAPH_CFG: &str = "extract_recograph_{0}.cfg";
    pub const DEFAULT_SQL_SCRIPT: &str = "populate_graph_tables_{0}.sql";
    pub const DATABASE_VARIABLE: &str = "GRAPH_BATCH_DATABASE";

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum JobVariant {
        DATA,
        MC,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Extractor {
        pub exe: String,
        pub cfg_template: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Templates {
        pub mcgraph: Option<Extractor>,
        pub recograph: Extractor,
        pub sql_script: String,
        pub psql: String,
    }

    impl Templates {
        pub fn data() -> Self {
            Self {
                mcgraph: None,
                recograph: Extractor {
                    exe: DEFAULT_RECOGRAPH_EXE.to_string(),
                    cfg_template: DEFAULT_RECOGRAPH_CFG.to_string(),
                },
                sql_script: DEFAULT_SQL_SCRIPT.to_string(),
                psql: DEFAULT_PSQL.to_string(),
            }
        }

        pub fn mc() -> Self {
            Self {
                mcgraph: Some(Extractor {
                    exe: DEFAULT_MCGRAPH_EXE.to_string(),
                    cfg_template: DEFAULT_MCGRAPH_CFG.to_string(),
                }),
                ..Self::data()
            }
        }

        pub fn apply_options(
            &mut self,
            options: &BTreeMap<&str, &str>,
            variant: JobVariant,
        ) -> Result<(), Error> {
            for (key, value) in options {
                let value = value.to_string();
                match *key {
                    "mcgraph" | "mcgraph_cfg" if variant == JobVariant::DATA => {
                        return Err(Error::new(
                            ErrorKind::InvalidInput,
                            format!("option {} unsupported for data jobs", key),
                        ));
                    }
                    "mcgraph" => {
                        if let Some(mcgraph) = self.mcgraph.as_mut() {
                            mcgraph.exe = value;
                        }
                    }
                    "mcgraph_cfg" => {
                        if let Some(mcgraph) = self.mcgraph.as_mut() {
                            mcgraph.cfg_template = value;
                        }
                    }
                    "recograph" => self.recograph.exe = value,
                    "recograph_cfg" => self.recograph.cfg_template = value,
                    "sql_script" => self.sql_script = value,
                    "psql" => self.psql = value,
                    _ => {
                        return Err(Error::new(
                            ErrorKind::InvalidInput,
                            format!("unknown option: {}", key),
                        ));
                    }
                }
            }
            Ok(())
        }

        pub fn validate(&self) -> Result<(), Error> {
            if let Some(mcgraph) = &self.mcgraph {
                validate_template(&mcgraph.cfg_template)?;
            }
            validate_template(&self.recograph.cfg_template)?;
            validate_template(&self.sql_script)?;
            Ok(())
        }
    }

    /// One child process invocation, in the order it will be launched.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Step {
        pub label: String,
        pub program: String,
        pub args: Vec<String>,
    }

    impl Step {
        pub fn command_line(&self) -> String {
            let mut line = self.program.clone();
            for arg in &self.args {
                line.push(' ');
                line.push_str(arg);
            }
            line
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct StepTiming {
        pub label: String,
        pub elapsed: Duration,
    }

    #[derive(Debug, Clone)]
    pub struct JobReport {
        pub suffix: String,
        pub started: DateTime<Local>,
        pub finished: DateTime<Local>,
        pub steps: Vec<StepTiming>,
        pub total: Duration,
    }

    /// A child that exited non-zero. `code` is `None` when it was killed by a signal.
    #[derive(Debug, Clone, PartialEq)]
    pub struct StepFailure {
        pub label: String,
        pub command_line: String,
        pub code: Option<i32>,
    }

    impl fmt::Display for StepFailure {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self.code {
                Some(code) => write!(
                    f,
                    "{} failed: `{}` exited with status {}",
                    self.label, self.command_line, code
                ),
                None => write!(
                    f,
                    "{} failed: `{}` terminated by signal",
                    self.label, self.command_line
                ),
            }
        }
    }

    impl std::error::Error for StepFailure {}

    pub fn step_failure(error: &Error) -> Option<&StepFailure> {
        error
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<StepFailure>())
    }

    pub fn exit_code(error: &Error) -> i32 {
        if let Some(failure) = step_failure(error) {
            return match failure.code {
                Some(code) if code > 0 && code < 256 => code,
                _ => exitcode::SOFTWARE,
            };
        }
        match error.kind() {
            ErrorKind::NotFound => exitcode::UNAVAILABLE,
            ErrorKind::InvalidInput => exitcode::CONFIG,
            _ => exitcode::IOERR,
        }
    }

    pub fn parse_options(options_string: &str) -> Result<BTreeMap<&str, &str>, Error> {
        let mut options: BTreeMap<&str, &str> = BTreeMap::new();
        for segment in options_string.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }
            match segment.split_once('=') {
                Some((key, value)) => {
                    if options.insert(key.trim(), value.trim()).is_some() {
                        return Err(Error::new(
                            ErrorKind::InvalidInput,
                            format!("duplicate option: {}", key.trim()),
                        ));
                    }
                }
                None => {
                    return Err(Error::new(
                        ErrorKind::InvalidInput,
                        format!("missing value for option: {}", segment),
                    ));
                }
            }
        }
        Ok(options)
    }

    pub fn print_options(command: &str, options: &BTreeMap<&str, &str>) {
        for (key, value) in options {
            if !value.is_empty() {
                println!("{}: [{}={}]", command, key, value);
            }
        }
    }

    pub fn print_templates(command: &str, templates: &Templates) {
        if let Some(mcgraph) = &templates.mcgraph {
            println!("{}: mcgraph: [{} {}]", command, mcgraph.exe, mcgraph.cfg_template);
        }
        println!(
            "{}: recograph: [{} {}]",
            command, templates.recograph.exe, templates.recograph.cfg_template
        );
        println!(
            "{}: populate: [{} {}]",
            command, templates.psql, templates.sql_script
        );
    }

    pub fn load_environment() {
        dotenv().ok();
    }

    pub fn resolve_database(database: Option<&str>) -> String {
        resolve_database_from(database, env::var(DATABASE_VARIABLE).ok())
    }

    /// `--database` wins over the environment value, which wins over the default.
    pub fn resolve_database_from(database: Option<&str>, env_value: Option<String>) -> String {
        if let Some(database) = database {
            return database.to_string();
        }
        match env_value {
            Some(database) if !database.is_empty() => database,
            _ => DEFAULT_DATABASE.to_string(),
        }
    }

    pub fn plan_job(
        suffix: &str,
        templates: &Templates,
        database: &str,
    ) -> Result<Vec<Step>, Error> {
        let mut steps = Vec::with_capacity(3);
        if let Some(mcgraph) = &templates.mcgraph {
            steps.push(Step {
                label: String::from("extracting mcgraph"),
                program: mcgraph.exe.clone(),
                args: vec![format_template(&mcgraph.cfg_template, suffix)?],
            });
        }
        steps.push(Step {
            label: String::from("extracting recograph"),
            program: templates.recograph.exe.clone(),
            args: vec![format_template(&templates.recograph.cfg_template, suffix)?],
        });
        steps.push(Step {
            label: String::from("populating database"),
            program: templates.psql.clone(),
            args: vec![
                String::from("-d"),
                database.to_string(),
                String::from("-f"),
                format_template(&templates.sql_script, suffix)?,
            ],
        });
        Ok(steps)
    }

    pub trait JobProcessor {
        fn get_command(&self) -> &String;
        fn get_jobs(&self) -> &Vec<String>;
        fn get_database(&self) -> &String;
        fn get_templates(&self) -> &Templates;
        fn get_variant(&self) -> JobVariant;
        fn launcher(&mut self) -> &mut dyn Launcher;

        fn plan(&self, suffix: &str) -> Result<Vec<Step>, Error> {
            plan_job(suffix, self.get_templates(), self.get_database())
        }

        fn process(&mut self, suffix: &str) -> Result<JobReport, Error> {
            let steps = self.plan(suffix)?;

            println!("+ begin processing {}\n", suffix);
            let started = Local::now();
            let start_all = Instant::now();
            let mut timings = Vec::with_capacity(steps.len());

            for step in &steps {
                println!("  {}...", step.label);
                let start = Instant::now();
                let status = self.launcher().launch(&step.program, &step.args)?;
                let elapsed = start.elapsed();

                if status != Some(0) {
                    return Err(Error::other(StepFailure {
                        label: step.label.clone(),
                        command_line: step.command_line(),
                        code: status,
                    }));
                }
                println!("  completed in {:.2} seconds. \n", elapsed.as_secs_f64());
                timings.push(StepTiming {
                    label: step.label.clone(),
                    elapsed,
                });
            }

            let total = start_all.elapsed();
            println!("  done. total runtime: {:.2} seconds \n", total.as_secs_f64());

            Ok(JobReport {
                suffix: suffix.to_string(),
                started,
                finished: Local::now(),
                steps: timings,
                total,
            })
        }

        fn run(&mut self) -> Result<Vec<JobReport>, Error> {
            let command = self.get_command().clone();
            let jobs = self.get_jobs().clone();

            println!("{}: variant: {:?}", command, self.get_variant());
            println!("{}: database: [{}]", command, self.get_database());
            println!("{}: jobs: {:?}", command, jobs);
            println!("{}: starting up at {}.", command, Local::now().to_rfc3339());

            let start = Instant::now();
            let mut reports = Vec::with_capacity(jobs.len());
            for suffix in &jobs {
                reports.push(self.process(suffix)?);
            }

            println!(
                "{}: processed {} job(s) in {:?}",
                command,
                reports.len(),
                start.elapsed()
            );
            println!("{}: finished at {}.", command, Local::now().to_rfc3339());
            Ok(reports)
        }
    }
}
