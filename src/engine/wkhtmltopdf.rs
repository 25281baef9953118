//! Rendering through an external `wkhtmltopdf` process.
//!
//! The markup is streamed to the child over stdin (`-` as the input argument) and the
//! child writes the PDF straight to the destination. There is no timeout: a hung engine
//! blocks the run.

use super::RenderEngine;
use crate::job::RenderOptions;
use anyhow::{bail, Context, Result};
use log::debug;
use std::ffi::OsString;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[derive(Debug, Clone)]
pub struct Wkhtmltopdf {
    executable: PathBuf,
}

impl Wkhtmltopdf {
    pub fn new<P: Into<PathBuf>>(executable: P) -> Wkhtmltopdf {
        Wkhtmltopdf {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Command line for rendering stdin into `destination`
    fn arguments(destination: &Path, options: &RenderOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["--quiet".into(), "--encoding".into(), "UTF-8".into()];
        if options.suppress_images {
            args.push("--no-images".into());
        }
        if options.suppress_scripts {
            args.push("--disable-javascript".into());
        }
        if options.suppress_external_links {
            args.push("--disable-external-links".into());
        }
        args.push("-".into());
        args.push(destination.as_os_str().to_os_string());
        args
    }
}

impl RenderEngine for Wkhtmltopdf {
    fn render(&self, markup: &str, destination: &Path, options: &RenderOptions) -> Result<()> {
        let args = Wkhtmltopdf::arguments(destination, options);
        debug!("running {} {:?}", self.executable.display(), args);

        // the output check below must only ever see what this run wrote
        match std::fs::remove_file(destination) {
            Err(e) if e.kind() != ErrorKind::NotFound => {
                return Err(e).with_context(|| {
                    format!("Failed to remove stale output {}", destination.display())
                });
            }
            _ => {}
        }

        let mut child = Command::new(&self.executable)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| {
                format!(
                    "Failed to spawn {}; ensure wkhtmltopdf is installed",
                    self.executable.display()
                )
            })?;

        let mut stdin = child
            .stdin
            .take()
            .with_context(|| format!("Failed to open stdin of {}", self.executable.display()))?;

        // feed stdin from its own thread while stderr drains here
        let (output, fed) = std::thread::scope(|scope| {
            let feeder = scope.spawn(move || stdin.write_all(markup.as_bytes()));
            let output = child.wait_with_output();
            let fed = feeder
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (output, fed)
        });

        let output = output
            .with_context(|| format!("Failed to wait on {}", self.executable.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} exited with {}: {}",
                self.executable.display(),
                output.status,
                stderr.trim()
            );
        }
        fed.context("Failed to write markup to the rendering engine")?;

        let written = std::fs::metadata(destination).map(|m| m.len()).unwrap_or(0);
        if written == 0 {
            bail!(
                "{} didn't produce any output at {}",
                self.executable.display(),
                destination.display()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::Mutex;

    // writing a script while another test forks can leave it "text file busy"
    static SPAWNS: Mutex<()> = Mutex::new(());

    fn args_as_strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn arguments_include_all_suppression_flags_by_default() {
        let args = args_as_strings(Wkhtmltopdf::arguments(
            Path::new("out/a.pdf"),
            &RenderOptions::default(),
        ));
        assert_eq!(
            args,
            vec![
                "--quiet",
                "--encoding",
                "UTF-8",
                "--no-images",
                "--disable-javascript",
                "--disable-external-links",
                "-",
                "out/a.pdf",
            ]
        );
    }

    #[test]
    fn arguments_omit_disabled_flags() {
        let options = RenderOptions {
            suppress_images: false,
            suppress_scripts: true,
            suppress_external_links: false,
        };
        let args = args_as_strings(Wkhtmltopdf::arguments(Path::new("x.pdf"), &options));
        assert!(!args.contains(&"--no-images".to_string()));
        assert!(args.contains(&"--disable-javascript".to_string()));
        assert!(!args.contains(&"--disable-external-links".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("x.pdf"));
    }

    #[test]
    fn missing_executable_is_an_error() {
        let _guard = SPAWNS.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().expect("can create temp dir");
        let engine = Wkhtmltopdf::new(dir.path().join("no-such-wkhtmltopdf"));
        let err = engine
            .render(
                "<html></html>",
                &dir.path().join("out.pdf"),
                &RenderOptions::default(),
            )
            .expect_err("missing engine fails");
        assert!(format!("{err:#}").contains("Failed to spawn"));
        assert!(!dir.path().join("out.pdf").exists());
    }

    #[cfg(unix)]
    mod scripted {
        use super::super::*;
        use super::SPAWNS;
        use std::os::unix::fs::PermissionsExt;

        fn engine_script(dir: &Path, body: &str) -> Wkhtmltopdf {
            let path = dir.join("fake-wkhtmltopdf");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("can write script");
            let mut perms = std::fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms).expect("can make script executable");
            Wkhtmltopdf::new(path)
        }

        #[test]
        fn writes_pdf_from_stdin() {
            let _guard = SPAWNS.lock().unwrap_or_else(|e| e.into_inner());
            let dir = tempfile::tempdir().expect("can create temp dir");
            // copy stdin to the last argument so the markup can be inspected
            let engine = engine_script(
                dir.path(),
                r#"for last in "$@"; do :; done
cat > "$last""#,
            );
            let destination = dir.path().join("out.pdf");

            engine
                .render("<html>hi</html>", &destination, &RenderOptions::default())
                .expect("fake engine succeeds");

            let written = std::fs::read_to_string(&destination).expect("output exists");
            assert_eq!(written, "<html>hi</html>");
        }

        #[test]
        fn non_zero_exit_reports_stderr() {
            let _guard = SPAWNS.lock().unwrap_or_else(|e| e.into_inner());
            let dir = tempfile::tempdir().expect("can create temp dir");
            let engine = engine_script(dir.path(), "cat > /dev/null\necho 'boom' >&2\nexit 3");

            let err = engine
                .render(
                    "<html></html>",
                    &dir.path().join("out.pdf"),
                    &RenderOptions::default(),
                )
                .expect_err("failing engine is an error");
            let message = format!("{err:#}");
            assert!(message.contains("boom"), "{message}");
        }

        #[test]
        fn empty_output_is_an_error() {
            let _guard = SPAWNS.lock().unwrap_or_else(|e| e.into_inner());
            let dir = tempfile::tempdir().expect("can create temp dir");
            let engine = engine_script(dir.path(), "cat > /dev/null\nexit 0");

            let err = engine
                .render(
                    "<html></html>",
                    &dir.path().join("out.pdf"),
                    &RenderOptions::default(),
                )
                .expect_err("silent engine is an error");
            assert!(format!("{err:#}").contains("didn't produce any output"));
        }

        #[test]
        fn output_left_by_an_earlier_run_does_not_count() {
            let _guard = SPAWNS.lock().unwrap_or_else(|e| e.into_inner());
            let dir = tempfile::tempdir().expect("can create temp dir");
            let engine = engine_script(dir.path(), "cat > /dev/null\nexit 0");
            let destination = dir.path().join("out.pdf");
            std::fs::write(&destination, "%PDF-1.4\n%old\n").expect("can write old output");

            let err = engine
                .render("<html></html>", &destination, &RenderOptions::default())
                .expect_err("nothing new was written");
            assert!(format!("{err:#}").contains("didn't produce any output"));
            assert!(!destination.exists());
        }

        #[test]
        fn engine_quitting_before_reading_reports_its_stderr() {
            let _guard = SPAWNS.lock().unwrap_or_else(|e| e.into_inner());
            let dir = tempfile::tempdir().expect("can create temp dir");
            let engine = engine_script(dir.path(), "echo 'Error: bad option' >&2\nexit 1");
            let markup = "x".repeat(1024 * 1024);

            let err = engine
                .render(
                    &markup,
                    &dir.path().join("out.pdf"),
                    &RenderOptions::default(),
                )
                .expect_err("failing engine is an error");
            let message = format!("{err:#}");
            assert!(message.contains("bad option"), "{message}");
            assert!(!message.contains("Broken pipe"), "{message}");
        }

        #[test]
        fn chatty_engine_does_not_stall() {
            let _guard = SPAWNS.lock().unwrap_or_else(|e| e.into_inner());
            let dir = tempfile::tempdir().expect("can create temp dir");
            // more stderr than a pipe buffer holds, before any input is read
            let engine = engine_script(
                dir.path(),
                r#"head -c 262144 /dev/zero | tr '\0' w >&2
for last in "$@"; do :; done
cat > "$last""#,
            );
            let destination = dir.path().join("out.pdf");
            let markup = "y".repeat(256 * 1024);

            engine
                .render(&markup, &destination, &RenderOptions::default())
                .expect("fake engine succeeds");
            assert_eq!(
                std::fs::metadata(&destination).expect("output exists").len(),
                markup.len() as u64
            );
        }
    }
}
