//! Demo: score a transcript from the command line and print the report.
//!
//! ```text
//! report-demo [--elapsed SECS] [--question TEXT] [TRANSCRIPT...]
//! ```
//! Without TRANSCRIPT words the transcript is read from stdin.

use std::io::Read;

use anyhow::Context;
use interview_feedback::face::FaceAnalysis;
use interview_feedback::questions::QuestionBank;
use interview_feedback::report::generate_report_with_face;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut elapsed: Option<f64> = None;
    let mut question: Option<String> = None;
    let mut words: Vec<String> = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--elapsed" => {
                let v = args.next().context("--elapsed needs a value")?;
                elapsed = Some(v.parse().with_context(|| format!("bad --elapsed {v}"))?);
            }
            "--question" => {
                question = Some(args.next().context("--question needs a value")?);
            }
            _ => words.push(arg),
        }
    }

    let transcript = if words.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read transcript from stdin")?;
        buf.trim_end_matches('\n').to_string()
    } else {
        words.join(" ")
    };

    let question = match question {
        Some(q) => q,
        None => QuestionBank::from_env()
            .get(0)
            .map(|q| q.question.clone())
            .unwrap_or_default(),
    };
    let elapsed =
        elapsed.unwrap_or_else(|| interview_feedback::analyze::derived_time_secs(&transcript));

    let report = generate_report_with_face(
        &question,
        &transcript,
        "",
        &FaceAnalysis::NoFace,
        elapsed,
    );
    print!("{}", report.render());
    Ok(())
}
