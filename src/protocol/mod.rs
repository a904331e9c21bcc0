//! Remote Serial Protocol plumbing: framing, command parsing and reply
//! formatting.

pub(crate) mod commands;
pub(crate) mod common;
mod packet;
mod recv_packet;
mod response_writer;
mod send_packet;

pub(crate) use commands::{Command, CommandParseError};
pub(crate) use packet::PacketBuf;
pub(crate) use recv_packet::{recv_packet, Incoming};
pub(crate) use response_writer::{Error as ResponseWriterError, ResponseWriter};
pub(crate) use send_packet::send_packet;
