//! Pointer input shared between an input producer and the render loop

mod listener;
mod pointer;

pub use listener::{decode_packet, MouseListener, PACKET_LEN};
pub use pointer::{PointerSnapshot, PointerState, PointerTracker};
