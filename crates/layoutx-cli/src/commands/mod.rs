pub mod field;
pub mod layout;
pub mod seed;
pub mod tool;

use std::io::Read;
use std::path::Path;

/// Read `path`, or stdin when no path is given or the path is `-`
pub(crate) fn read_input(path: Option<&Path>) -> Result<String, Box<dyn std::error::Error>> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
