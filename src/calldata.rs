//! On-the-fly calldata from a hand-typed function signature and a
//! comma-separated argument string.
//!
//! Argument splitting is deliberately naive: one bare comma split, so array
//! and tuple literals are not expressible. That is an accepted limit of the
//! hand-typed console format, not something to quietly work around.

use ethers::abi::token::{LenientTokenizer, Tokenizer};
use ethers::abi::{Function, HumanReadableParser};
use ethers::types::Bytes;

use crate::error::CalldataError;

/// Encoded call data plus the parsed function name (kept for logging).
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedCall {
    pub data: Bytes,
    pub function_name: String,
}

/// Build calldata for `signature` (e.g. `mint(uint256,address)`) from one
/// comma-separated argument string (e.g. `"1, 0xabc..."`).
///
/// Arguments are matched to declared parameters positionally; type coercion
/// (decimal string to uint, 0x string to address, ...) is lenient, the same
/// rules the rest of the tooling ecosystem applies to hand-typed values.
pub fn build_calldata(signature: &str, raw_args: &str) -> Result<EncodedCall, CalldataError> {
    let function = parse_signature(signature)?;
    let args = split_args(raw_args);

    if args.len() != function.inputs.len() {
        return Err(CalldataError::SignatureMismatch {
            expected: function.inputs.len(),
            got: args.len(),
        });
    }

    let mut tokens = Vec::with_capacity(args.len());
    for (index, (param, value)) in function.inputs.iter().zip(&args).enumerate() {
        let token = LenientTokenizer::tokenize(&param.kind, value).map_err(|e| {
            CalldataError::ArgumentEncoding {
                index,
                value: value.clone(),
                param: param.kind.to_string(),
                reason: e.to_string(),
            }
        })?;
        tokens.push(token);
    }

    let data = function
        .encode_input(&tokens)
        .map_err(|e| CalldataError::InvalidSignature(format!("{}: {}", signature, e)))?;

    Ok(EncodedCall {
        data: Bytes::from(data),
        function_name: function.name,
    })
}

/// Parse `name(type,type,...)` into an ABI function description.
fn parse_signature(signature: &str) -> Result<Function, CalldataError> {
    let trimmed = signature.trim();
    // Cheap shape check first, so the error names the console format rather
    // than a lexer internal.
    let name = trimmed.split('(').next().unwrap_or("").trim();
    if name.is_empty() || !trimmed.contains('(') || !trimmed.ends_with(')') {
        return Err(CalldataError::InvalidSignature(signature.to_string()));
    }
    HumanReadableParser::parse_function(trimmed)
        .or_else(|_| HumanReadableParser::parse_function(&format!("function {}", trimmed)))
        .map_err(|_| CalldataError::InvalidSignature(signature.to_string()))
}

/// Split a comma-separated argument string; all-whitespace means zero
/// arguments.
fn split_args(raw_args: &str) -> Vec<String> {
    if raw_args.trim().is_empty() {
        return Vec::new();
    }
    raw_args.split(',').map(|a| a.trim().to_string()).collect()
}
