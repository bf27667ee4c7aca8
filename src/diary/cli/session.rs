//! Interactive session: one book on screen, one command per line.
//!
//! The session plays the part of the animation engine. A flip renders the
//! turning sheet, a few frames along the eased curve, sleeps out the timeline
//! and then reports completion to the API.

use super::render::Renderer;
use super::setup::{session_help, SessionCommand, SessionLine};
use clap::Parser;
use diary::animation::FlipTimeline;
use diary::api::{CmdMessage, DiaryApi};
use diary::error::Result;
use diary::model::{Direction, Point};
use diary::store::KeyValueStore;
use log::debug;
use std::io::{BufRead, Write};
use std::thread;

const PROMPT: &str = "diary> ";
const FLIP_FRAMES: u32 = 6;

enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a, S: KeyValueStore, R: BufRead, W: Write> {
    api: &'a mut DiaryApi<S>,
    renderer: &'a Renderer,
    timeline: FlipTimeline,
    input: R,
    output: W,
}

impl<'a, S: KeyValueStore, R: BufRead, W: Write> Session<'a, S, R, W> {
    pub fn new(
        api: &'a mut DiaryApi<S>,
        renderer: &'a Renderer,
        timeline: FlipTimeline,
        input: R,
        output: W,
    ) -> Self {
        Self {
            api,
            renderer,
            timeline,
            input,
            output,
        }
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        self.show_book()?;

        let mut line = String::new();
        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            let words: Vec<&str> = line.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }

            let command = match SessionLine::try_parse_from(words) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    debug!("event=session_parse_error line={:?}", line.trim());
                    write!(self.output, "{}", e.render())?;
                    continue;
                }
            };

            if let Flow::Quit = self.dispatch(command)? {
                break;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, command: SessionCommand) -> Result<Flow> {
        match command {
            SessionCommand::Next => self.flip(Direction::Forward)?,
            SessionCommand::Prev => self.flip(Direction::Backward)?,
            SessionCommand::Write { page, text } => {
                let result = self.api.write_page(page, text.join(" "))?;
                self.show_messages(&result.messages)?;
                self.show_book()?;
            }
            SessionCommand::Sticky => {
                self.api.toggle_placing();
                self.show_book()?;
            }
            SessionCommand::Click { x, y } => {
                let result = self.api.click(Point::new(x, y))?;
                self.show_messages(&result.messages)?;
                if !result.affected_notes.is_empty() {
                    self.show_book()?;
                }
            }
            SessionCommand::Drag { id, x, y } => {
                let result = self.api.drag_note(&id, Point::new(x, y))?;
                self.show_note_result(&result.messages, &result.affected_notes)?;
            }
            SessionCommand::Note { id, text } => {
                let result = self.api.edit_note(&id, text.join(" "))?;
                self.show_note_result(&result.messages, &result.affected_notes)?;
            }
            SessionCommand::Rm { id } => {
                let result = self.api.remove_note(&id)?;
                self.show_messages(&result.messages)?;
            }
            SessionCommand::Reload => {
                let result = self.api.reload()?;
                self.show_messages(&result.messages)?;
                self.show_book()?;
            }
            SessionCommand::New => {
                writeln!(self.output, "New: {}", self.api.new_link())?;
            }
            SessionCommand::Show => self.show_book()?,
            SessionCommand::Notes => {
                write!(self.output, "{}", self.renderer.notes(self.api.notes()))?;
            }
            SessionCommand::Help => write!(self.output, "{}", session_help())?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn flip(&mut self, dir: Direction) -> Result<()> {
        if !self.api.request_flip(dir) {
            let edge = match dir {
                Direction::Forward => "last",
                Direction::Backward => "first",
            };
            return self.show_messages(&[CmdMessage::info(format!(
                "Already at the {} spread",
                edge
            ))]);
        }

        self.animate_flip()?;
        self.api.complete_flip();
        self.show_book()
    }

    fn animate_flip(&mut self) -> Result<()> {
        let Some(flip) = self.api.view().flip else {
            return Ok(());
        };
        write!(self.output, "{}", self.renderer.flip(&flip))?;
        self.output.flush()?;

        thread::sleep(self.timeline.start_delay);
        if self.timeline.duration.is_zero() {
            return Ok(());
        }

        let step = self.timeline.duration / FLIP_FRAMES;
        for frame in 1..=FLIP_FRAMES {
            thread::sleep(step);
            let progress = self.timeline.progress(self.timeline.start_delay + step * frame);
            write!(
                self.output,
                "{}",
                self.renderer.frame(&flip.transform, progress)
            )?;
            self.output.flush()?;
        }
        Ok(())
    }

    fn show_book(&mut self) -> Result<()> {
        let view = self.api.view();
        write!(self.output, "{}", self.renderer.book(&view))?;
        Ok(())
    }

    fn show_messages(&mut self, messages: &[CmdMessage]) -> Result<()> {
        write!(self.output, "{}", self.renderer.messages(messages))?;
        Ok(())
    }

    fn show_note_result(
        &mut self,
        messages: &[CmdMessage],
        notes: &[diary::model::StickyNote],
    ) -> Result<()> {
        self.show_messages(messages)?;
        if !notes.is_empty() {
            write!(self.output, "{}", self.renderer.notes(notes))?;
        }
        Ok(())
    }
}
