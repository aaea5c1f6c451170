//! The line-oriented CLI binding component.
//!
//! Buffers characters from a non-blocking [`Reader`] into an argv-style
//! token table, dispatching on newline by matching the first token against
//! the command table with the OSC pattern matcher. A `> ` prompt is printed
//! at startup and after every completed line; overflowing either the byte
//! buffer or the token table resets the line with a diagnostic.
//!
//! ```text
//!  Reader ──▶ ┌──────────────────────────┐
//!             │ buffer[128] · tokens[8]  │──▶ /help /list /describe /set
//!  Console ◀──│ (NUL-separated tokens)   │
//!             └──────────────────────────┘
//! ```

pub mod commands;
pub mod console;
pub mod reader;

pub use console::{Console, StdoutConsole, TestConsole};
pub use reader::{Reader, StdinReader, TestReader};

use log::debug;

use crate::component::{Component, ComponentMeta};
use crate::osc::pattern::osc_match_pattern;
use crate::runtime::Context;

/// Token table capacity. A `/set` on a three-element array uses five.
pub const MAX_ARGS: usize = 8;

/// Line buffer capacity in bytes, NUL separators included.
pub const BUFFER_SIZE: usize = 128;

/// The CLI component. Generic over its character source and sink so tests
/// can drive it from scripted strings.
pub struct Cli<R: Reader + 'static, C: Console + 'static> {
    meta: ComponentMeta,
    reader: R,
    console: C,
    buffer: [u8; BUFFER_SIZE],
    write_pos: usize,
    token_starts: heapless::Vec<usize, MAX_ARGS>,
}

impl<R: Reader + 'static, C: Console + 'static> Cli<R, C> {
    pub fn new(reader: R, console: C) -> Self {
        Self {
            meta: ComponentMeta::named("CLI")
                .describe(
                    "Generate a simple command line interface for inspecting and sending data \
                     to the bound components.",
                )
                .version("0.1.0"),
            reader,
            console,
            buffer: [0; BUFFER_SIZE],
            write_pos: 0,
            token_starts: heapless::Vec::new(),
        }
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    fn prompt(&mut self) {
        self.console.print("> ");
    }

    fn reset(&mut self) {
        self.write_pos = 0;
        self.token_starts.clear();
        self.prompt();
    }

    fn overflow(&mut self) {
        self.console.println("CLI line buffer overflow!");
        self.reset();
    }

    /// Feed one character into the line buffer, dispatching on newline.
    fn process(&mut self, c: u8, cx: &mut Context<'_>) {
        if self.write_pos == BUFFER_SIZE {
            self.overflow();
        }
        if c == b' ' || c == b'\t' || c == b'\n' {
            self.buffer[self.write_pos] = 0;
            self.write_pos += 1;
            if c == b'\n' {
                self.dispatch(cx);
                self.reset();
            }
        } else {
            if self.starting_new_token() && self.token_starts.len() == MAX_ARGS {
                self.overflow();
            }
            if self.starting_new_token() {
                let _ = self.token_starts.push(self.write_pos);
            }
            self.buffer[self.write_pos] = c;
            self.write_pos += 1;
        }
    }

    fn starting_new_token(&self) -> bool {
        self.write_pos == 0 || self.buffer[self.write_pos - 1] == 0
    }

    fn dispatch(&mut self, cx: &mut Context<'_>) {
        let mut argv: heapless::Vec<&str, MAX_ARGS> = heapless::Vec::new();
        for &start in &self.token_starts {
            let end = self.buffer[start..self.write_pos]
                .iter()
                .position(|&b| b == 0)
                .map_or(self.write_pos, |i| start + i);
            match core::str::from_utf8(&self.buffer[start..end]) {
                Ok(token) if !token.is_empty() => {
                    let _ = argv.push(token);
                }
                Ok(_) => {}
                Err(_) => {
                    self.console.println("Unable to parse token: not valid UTF-8");
                    return;
                }
            }
        }
        let Some(&command) = argv.first() else { return };

        let mut matched = false;
        for spec in &commands::COMMANDS {
            if !osc_match_pattern(command, spec.name) {
                continue;
            }
            matched = true;
            let code = match spec.name {
                "/help" => commands::help(&mut self.console),
                "/list" => commands::list(&mut self.console, cx),
                "/describe" => commands::describe(&argv, &mut self.console, cx),
                "/set" => commands::set(&argv, &mut self.console, cx),
                _ => 0,
            };
            if code != 0 {
                debug!("cli: {} exited with code {code}", spec.name);
            }
        }
        if !matched {
            self.console.println(&format!("unknown command '{command}'"));
        }
    }
}

impl<R: Reader + 'static, C: Console + 'static> Component for Cli<R, C> {
    fn meta(&self) -> &ComponentMeta {
        &self.meta
    }

    fn init(&mut self, _cx: &mut Context<'_>) {
        self.console.println("CLI enabled. Write `/help` for a list of available commands.");
        self.prompt();
    }

    fn external_sources(&mut self, cx: &mut Context<'_>) {
        while self.reader.ready() {
            let c = self.reader.getchar();
            self.process(c, cx);
        }
    }
}
