use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::read_values;
use anyhow::Result;
use clap::Args;
use hkphone_core::{ErrorCode, FieldError};
use serde::Serialize;
use std::io;
use tracing::debug;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Numbers to validate; read one per line from stdin when omitted
    pub numbers: Vec<String>,
    /// Accept empty values instead of reporting them as required
    #[arg(long)]
    pub optional: bool,
}

#[derive(Debug, Serialize)]
struct CheckResultDto {
    input: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    normalized: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl CheckResultDto {
    fn from_outcome(input: String, outcome: Result<String, FieldError>) -> Self {
        match outcome {
            Ok(normalized) => Self {
                input,
                ok: true,
                normalized: Some(normalized),
                code: None,
                message: None,
            },
            Err(err) => Self {
                input,
                ok: false,
                normalized: None,
                code: Some(err.code),
                message: Some(err.message),
            },
        }
    }
}

pub fn check(ctx: &Context<'_>, args: CheckArgs) -> Result<()> {
    let mut field = ctx.config.phone_field();
    if args.optional {
        field = field.required(false);
    }

    let inputs = if args.numbers.is_empty() {
        debug!("reading numbers from stdin");
        read_values(io::stdin().lock())?
    } else {
        args.numbers
    };

    let results: Vec<CheckResultDto> = inputs
        .into_iter()
        .map(|input| {
            let outcome = field.clean(Some(input.as_str()));
            if let Err(err) = &outcome {
                debug!(input = %input, code = %err.code, "rejected");
            }
            CheckResultDto::from_outcome(input, outcome)
        })
        .collect();

    if ctx.json {
        print_json(&results)?;
    } else {
        for item in &results {
            match (&item.normalized, item.code, &item.message) {
                (Some(normalized), _, _) => println!("{}\t{}", item.input, normalized),
                (None, Some(code), Some(message)) => {
                    println!("{}\terror[{}]: {}", item.input, code, message)
                }
                _ => {}
            }
        }
    }

    let rejected = results.iter().filter(|item| !item.ok).count();
    if rejected > 0 {
        return Err(invalid_input(format!(
            "{} of {} values rejected",
            rejected,
            results.len()
        )));
    }
    Ok(())
}
