//! Collects the run inputs from command-line flags, asking on the terminal
//! for anything that was not passed.

use crate::destinations::parse_address_count;
use crate::error::{Error, Result};
use crate::types::InputMethod;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInputs<C> {
    pub method: InputMethod,
    pub credentials: C,
    pub address_count: usize,
}

/// Asks for the input method, loads its credentials through `load`, then asks
/// for the address count. A bad credential file fails before the count prompt.
pub fn resolve_inputs<C, R, W, F>(
    method: Option<&str>,
    address_count: Option<&str>,
    default_count: usize,
    input: &mut R,
    output: &mut W,
    load: F,
) -> Result<RunInputs<C>>
where
    R: BufRead,
    W: Write,
    F: FnOnce(InputMethod) -> Result<C>,
{
    let method = match method {
        Some(m) => m.to_string(),
        None => ask(
            "Select input method (0 for seed phrase, 1 for private key): ",
            input,
            output,
        )?,
    };
    let method: InputMethod = method.parse()?;
    let credentials = load(method)?;

    let count = match address_count {
        Some(c) => c.to_string(),
        None => ask(
            &format!(
                "How many random addresses do you want to generate? (default is {default_count}): "
            ),
            input,
            output,
        )?,
    };
    let address_count = parse_address_count(&count, default_count)?;

    Ok(RunInputs {
        method,
        credentials,
        address_count,
    })
}

fn ask<R: BufRead, W: Write>(question: &str, input: &mut R, output: &mut W) -> Result<String> {
    let io_err = |e: std::io::Error| Error::config(format!("failed to read answer: {e}"));
    output.write_all(question.as_bytes()).map_err(io_err)?;
    output.flush().map_err(io_err)?;

    let mut line = String::new();
    input.read_line(&mut line).map_err(io_err)?;
    Ok(line.trim().to_string())
}
