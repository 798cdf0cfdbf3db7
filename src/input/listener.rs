//! Background reader for raw PS/2 mouse packets (e.g. `/dev/input/mice`)

use super::pointer::{PointerSnapshot, PointerState};
use crate::shapes::Point;
use std::io::{ErrorKind, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

/// Bytes per PS/2 movement packet
pub const PACKET_LEN: usize = 3;

/// Apply one packet to the previous position, clamped to `[top_left, bottom_right]`
///
/// Byte 0 carries the buttons (bit 0 left, bit 1 right), bytes 1 and 2 the signed
/// movement. The device reports y growing upwards, the screen grows downwards.
pub fn decode_packet(
    packet: [u8; PACKET_LEN],
    previous: Point,
    top_left: Point,
    bottom_right: Point,
) -> PointerSnapshot {
    let dx = i32::from(packet[1] as i8);
    let dy = i32::from(packet[2] as i8);
    let x = previous.x.saturating_add(dx).clamp(top_left.x, bottom_right.x);
    let y = previous.y.saturating_sub(dy).clamp(top_left.y, bottom_right.y);
    PointerSnapshot {
        position: Point::new(x, y),
        left: packet[0] & 0x1 != 0,
        right: packet[0] & 0x2 != 0,
    }
}

/// Reads packets on its own thread and publishes them into a [`PointerState`]
///
/// The thread ends at end of input, on a read error, or after the listener is
/// dropped (checked between packets).
pub struct MouseListener {
    state: PointerState,
    stop: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl MouseListener {
    pub fn spawn<R>(reader: R, frame_top_left: Point, frame_bottom_right: Point, start: Point) -> Self
    where
        R: Read + Send + 'static,
    {
        let start = Point::new(
            start.x.clamp(frame_top_left.x, frame_bottom_right.x),
            start.y.clamp(frame_top_left.y, frame_bottom_right.y),
        );
        let state = PointerState::new(start);
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let state = state.clone();
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                Self::read_loop(reader, &state, &stop, frame_top_left, frame_bottom_right);
            })
        };

        Self {
            state,
            stop,
            handle: Some(handle),
        }
    }

    fn read_loop(
        mut reader: impl Read,
        state: &PointerState,
        stop: &AtomicBool,
        top_left: Point,
        bottom_right: Point,
    ) {
        let mut packet = [0u8; PACKET_LEN];
        while !stop.load(Ordering::Acquire) {
            match reader.read_exact(&mut packet) {
                Ok(()) => {
                    state.update(|snap| {
                        *snap = decode_packet(packet, snap.position, top_left, bottom_right);
                    });
                }
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    log::debug!("Mouse input ended");
                    break;
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    log::warn!("Mouse read failed: {}", e);
                    break;
                }
            }
        }
    }

    /// Shared state the render loop reads from
    pub fn state(&self) -> PointerState {
        self.state.clone()
    }

    pub fn snapshot(&self) -> PointerSnapshot {
        self.state.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Block until the reader thread has ended
    pub fn wait(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Mouse listener thread panicked");
            }
        }
    }
}

impl Drop for MouseListener {
    fn drop(&mut self) {
        // a blocked read is not interrupted; the thread exits after its next packet
        self.stop.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TL: Point = Point::new(0, 0);
    const BR: Point = Point::new(99, 49);

    #[test]
    fn test_decode_buttons_and_motion() {
        let snap = decode_packet([0x09, 5, 3], Point::new(10, 10), TL, BR);
        assert_eq!(snap.position, Point::new(15, 7));
        assert!(snap.left);
        assert!(!snap.right);

        // negative deltas: 0xFE is -2
        let snap = decode_packet([0x0A, 0xFE, 0xFE], Point::new(10, 10), TL, BR);
        assert_eq!(snap.position, Point::new(8, 12));
        assert!(!snap.left);
        assert!(snap.right);
    }

    #[test]
    fn test_decode_clamps_to_frame() {
        let snap = decode_packet([0, 127, 0x80], Point::new(90, 45), TL, BR);
        assert_eq!(snap.position, Point::new(99, 49));
        let snap = decode_packet([0, 0x80, 127], Point::new(3, 3), TL, BR);
        assert_eq!(snap.position, Point::new(0, 0));
    }

    #[test]
    fn test_listener_publishes_until_eof() {
        let bytes = vec![
            0x08, 10, 0, // right 10
            0x09, 0, 0xFB, // down 5, left button
            0x08, 0, 0, // release
            0x01, 4, // truncated packet is dropped
        ];
        let listener = MouseListener::spawn(Cursor::new(bytes), TL, BR, Point::new(20, 20));
        let state = listener.state();
        listener.wait();

        let snap = state.snapshot();
        assert_eq!(snap.position, Point::new(30, 25));
        assert!(!snap.left);
    }

    #[test]
    fn test_reader_thread_stops_at_eof() {
        let listener = MouseListener::spawn(Cursor::new(vec![0x08, 1, 1]), TL, BR, Point::ORIGIN);
        for _ in 0..1000 {
            if !listener.is_running() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        assert!(!listener.is_running());
        assert_eq!(listener.snapshot().position, Point::new(1, 0));
    }

    #[test]
    fn test_start_is_clamped() {
        let listener = MouseListener::spawn(Cursor::new(Vec::new()), TL, BR, Point::new(500, -3));
        assert_eq!(listener.snapshot().position, Point::new(99, 0));
        listener.wait();
    }
}
