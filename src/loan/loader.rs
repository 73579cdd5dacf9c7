//! Load loan parameters from JSON config files

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;

use super::LoanParameters;
use crate::error::Result;

/// Load and validate parameters from a JSON file
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<LoanParameters> {
    let path = path.as_ref();
    info!("Loading loan parameters from {}", path.display());
    let file = File::open(path)?;
    load_parameters_from_reader(BufReader::new(file))
}

/// Load parameters from any reader (e.g., string buffer, request body)
pub fn load_parameters_from_reader<R: Read>(reader: R) -> Result<LoanParameters> {
    let params: LoanParameters = serde_json::from_reader(reader)?;
    params.validate()?;
    Ok(params)
}
