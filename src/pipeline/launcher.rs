/*
 * Galileo Network Analytics (GNA) Toolkit
 *
 * Copyright 2024-2025 Fidelis Farm & Technologies, LLC
 * All Rights Reserved.
 * See license information in LICENSE.
 */

use std::io::Error;
use std::process::Command;
use std::process::Stdio;

pub trait Launcher {
    /// Runs `program` to completion. Returns its exit code, or `None` if a signal ended it.
    fn launch(&mut self, program: &str, args: &[String]) -> Result<Option<i32>, Error>;
}

pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, program: &str, args: &[String]) -> Result<Option<i32>, Error> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::new(e.kind(), format!("failed to run {}: {}", program, e)))?;
        Ok(status.code())
    }
}

pub struct DryRunLauncher;

impl Launcher for DryRunLauncher {
    fn launch(&mut self, program: &str, args: &[String]) -> Result<Option<i32>, Error> {
        if args.is_empty() {
            println!("  [dry-run] {}", program);
        } else {
            println!("  [dry-run] {} {}", program, args.join(" "));
        }
        Ok(Some(0))
    }
}

pub fn select_launcher(dry_run: bool) -> Box<dyn Launcher> {
    if dry_run {
        Box::new(DryRunLauncher)
    } else {
        Box::new(ProcessLauncher)
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::Launcher;
    use std::cell::RefCell;
    use std::io::Error;
    use std::rc::Rc;

    pub type CallLog = Rc<RefCell<Vec<Vec<String>>>>;

    /// Records every launch; call number `fail_at` (zero based) reports `fail_code`.
    pub struct RecordingLauncher {
        pub calls: CallLog,
        pub fail_at: Option<usize>,
        pub fail_code: Option<i32>,
    }

    impl RecordingLauncher {
        pub fn new() -> (Self, CallLog) {
            let calls: CallLog = Rc::new(RefCell::new(Vec::new()));
            let launcher = Self {
                calls: Rc::clone(&calls),
                fail_at: None,
                fail_code: Some(1),
            };
            (launcher, calls)
        }

        pub fn failing_at(index: usize, code: Option<i32>) -> (Self, CallLog) {
            let (mut launcher, calls) = Self::new();
            launcher.fail_at = Some(index);
            launcher.fail_code = code;
            (launcher, calls)
        }
    }

    impl Launcher for RecordingLauncher {
        fn launch(&mut self, program: &str, args: &[String]) -> Result<Option<i32>, Error> {
            let mut call = vec![program.to_string()];
            call.extend(args.iter().cloned());
            let index = {
                let mut calls = self.calls.borrow_mut();
                calls.push(call);
                calls.len() - 1
            };
            if self.fail_at == Some(index) {
                return Ok(self.fail_code);
            }
            Ok(Some(0))
        }
    }
}
