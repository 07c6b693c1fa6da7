use crate::buffer::LineBuffer;
use crate::protocol::Command;

/// Assembles transport bytes into commands, one per CR- or LF-terminated line.
pub struct Ingress {
    buffer: LineBuffer,
}

impl Ingress {
    pub fn new() -> Self {
        Ingress {
            buffer: LineBuffer::new(),
        }
    }

    /// Takes one byte; yields a command when the byte completes a non-empty line.
    pub fn feed(&mut self, byte: u8) -> Option<Command> {
        match byte {
            b'\r' | b'\n' => {
                if self.buffer.is_empty() {
                    return None;
                }
                let command = self.complete();
                self.buffer.clear();
                command
            }
            _ => {
                self.buffer.push(byte);
                None
            }
        }
    }

    fn complete(&self) -> Option<Command> {
        if self.buffer.overflowed() {
            log::warn!("discarding overlong line");
            return None;
        }
        match core::str::from_utf8(self.buffer.as_bytes()) {
            Ok(line) => Command::new(line.trim_matches(is_blank)),
            Err(_) => {
                log::warn!("discarding line that is not valid UTF-8");
                None
            }
        }
    }
}

impl Default for Ingress {
    fn default() -> Self {
        Self::new()
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0b' | '\x0c')
}
