//! JSON encoding of compiled commands
//!
//! Commands serialize as `light.turn_on` service payloads:
//!
//! ```json
//! {"entity_id":"light.desk","brightness":128,"rgb_color":[255,0,0]}
//! ```

use heapless::String;
use serde::Serialize;

use crate::command::Command;
use crate::error::WireError;

/// Typical payload size, enough for every parameter at once.
pub const PAYLOAD_CAPACITY: usize = 256;

/// Encode `command` into `buf`, returning the written length.
pub fn encode_command(command: &Command, buf: &mut [u8]) -> Result<usize, WireError> {
    encode(command, buf)
}

/// Encode `command` into a fixed-capacity string.
pub fn command_to_string<const N: usize>(command: &Command) -> Result<String<N>, WireError> {
    serde_json_core::to_string::<_, N>(command).map_err(WireError::from)
}

/// Encode every command into `buf` as a JSON array, returning the written length.
pub fn encode_commands(commands: &[Command], buf: &mut [u8]) -> Result<usize, WireError> {
    encode(commands, buf)
}

fn encode<T: Serialize + ?Sized>(value: &T, buf: &mut [u8]) -> Result<usize, WireError> {
    let len = serde_json_core::to_slice(value, buf)?;
    log::trace!("encoded {len} byte payload");
    Ok(len)
}
