//! Headless driver: replays line commands against a scroller
//!
//! One command per line. `#` starts a comment at the start of a line or
//! after whitespace, so `add #1` adds the text `#1`:
//!
//! ```text
//! wheel -1 5      # five scroll ticks down
//! goto 7          # start scroll-to-index
//! settle          # tick until the animation ends
//! select 3
//! update hello
//! resize 250
//! ```

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::list::{ItemSlot, LayoutMetrics, Outcome, Scroller, Slot};
use crate::scroll::TaskState;
use crate::{Error, Result};

/// Upper bound on frames `settle` will run before giving up
const MAX_SETTLE_FRAMES: usize = 100_000;

/// Upper bound on `wheel` and `tick` repeat counts
const MAX_REPEAT: usize = MAX_SETTLE_FRAMES;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Wheel { delta: f32, times: usize },
    Goto(String),
    Tick(usize),
    Settle,
    Add(String),
    Select(usize),
    Update(String),
    Delete,
    Cancel,
    Resize(f32),
}

impl Command {
    /// Parse one line; blank lines and comments yield `None`
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name {
            "wheel" => {
                let mut args = rest.split_whitespace();
                let delta = number(args.next(), "wheel delta")?;
                let times = match args.next() {
                    Some(raw) => repeat(raw, "repeat count")?,
                    None => 1,
                };
                Command::Wheel { delta, times }
            }
            "goto" => Command::Goto(rest.to_string()),
            "tick" => Command::Tick(if rest.is_empty() { 1 } else { repeat(rest, "frame count")? }),
            "settle" => Command::Settle,
            "add" => Command::Add(text(rest, "add")?),
            "select" => Command::Select(count(rest, "index")?),
            "update" => Command::Update(text(rest, "update")?),
            "delete" => Command::Delete,
            "cancel" => Command::Cancel,
            "resize" => Command::Resize(number(Some(rest), "viewport height")?),
            other => return Err(format!("unknown command '{other}'")),
        };
        Ok(Some(command))
    }
}

fn number(raw: Option<&str>, what: &str) -> std::result::Result<f32, String> {
    let raw = raw.filter(|r| !r.is_empty()).ok_or_else(|| format!("missing {what}"))?;
    raw.parse()
        .map_err(|_| format!("invalid {what} '{raw}'"))
}

fn strip_comment(line: &str) -> &str {
    let mut prev = None;
    for (i, c) in line.char_indices() {
        if c == '#' && prev.map_or(true, char::is_whitespace) {
            return &line[..i];
        }
        prev = Some(c);
    }
    line
}

fn count(raw: &str, what: &str) -> std::result::Result<usize, String> {
    raw.parse().map_err(|_| format!("invalid {what} '{raw}'"))
}

fn repeat(raw: &str, what: &str) -> std::result::Result<usize, String> {
    let n = count(raw, what)?;
    if n > MAX_REPEAT {
        return Err(format!("{what} {n} exceeds {MAX_REPEAT}"));
    }
    Ok(n)
}

fn text(rest: &str, command: &str) -> std::result::Result<String, String> {
    if rest.is_empty() {
        Err(format!("'{command}' needs a value"))
    } else {
        Ok(rest.to_string())
    }
}

/// Visible state of one slot
#[derive(Debug, Clone, Serialize)]
pub struct SlotView {
    pub position: usize,
    pub index: Option<usize>,
    pub value: Option<String>,
    pub selected: bool,
}

/// Serializable picture of a scroller at one point in time
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub count: usize,
    pub top_index: usize,
    pub offset: f32,
    pub selected: Option<usize>,
    pub state: TaskState,
    pub metrics: LayoutMetrics,
    pub slots: Vec<SlotView>,
}

impl Snapshot {
    pub fn capture(scroller: &Scroller<String>) -> Self {
        Self {
            count: scroller.len(),
            top_index: scroller.top_index(),
            offset: scroller.offset(),
            selected: scroller.selected_index(),
            state: scroller.task_state(),
            metrics: scroller.metrics(),
            slots: scroller
                .slots()
                .iter()
                .enumerate()
                .map(|(position, slot): (usize, &Slot<String>)| SlotView {
                    position,
                    index: slot.backing_index(),
                    value: slot.value().cloned(),
                    selected: slot.is_selected(),
                })
                .collect(),
        }
    }
}

/// What one script line did
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub line: usize,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub steps: Vec<StepReport>,
    pub snapshot: Snapshot,
}

/// Parsed script, ready to run
#[derive(Debug, Clone, Default)]
pub struct Script {
    steps: Vec<(usize, String, Command)>,
}

impl Script {
    pub fn parse(source: &str) -> Result<Self> {
        let mut steps = Vec::new();
        for (i, raw) in source.lines().enumerate() {
            let line = i + 1;
            match Command::parse(raw) {
                Ok(Some(command)) => steps.push((line, raw.trim().to_string(), command)),
                Ok(None) => {}
                Err(message) => return Err(Error::Script { line, message }),
            }
        }
        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every command in order; `frame` is the simulated tick length
    pub fn run(&self, scroller: &mut Scroller<String>, frame: Duration) -> Result<Report> {
        let mut steps = Vec::with_capacity(self.steps.len());
        for (line, text, command) in &self.steps {
            debug!(line, command = %text, "script step");
            let mut report = StepReport {
                line: *line,
                command: text.clone(),
                outcome: None,
                frames: None,
            };
            match command {
                Command::Wheel { delta, times } => {
                    let mut last = None;
                    for _ in 0..*times {
                        last = Some(scroller.wheel(*delta));
                    }
                    report.outcome = last;
                }
                Command::Goto(raw) => report.outcome = Some(scroller.scroll_to_index(raw)),
                Command::Tick(frames) => {
                    for _ in 0..*frames {
                        scroller.tick(frame);
                    }
                    report.frames = Some(*frames);
                }
                Command::Settle => {
                    report.frames = Some(settle(scroller, frame).ok_or_else(|| Error::Script {
                        line: *line,
                        message: format!("animation did not settle within {MAX_SETTLE_FRAMES} frames"),
                    })?);
                }
                Command::Add(value) => report.outcome = Some(scroller.add_item(value.clone())),
                Command::Select(index) => report.outcome = Some(scroller.select_index(*index)),
                Command::Update(value) => report.outcome = Some(scroller.update_item(value.clone())),
                Command::Delete => report.outcome = Some(scroller.delete_item()),
                Command::Cancel => {
                    scroller.cancel_animation();
                }
                Command::Resize(viewport) => {
                    scroller
                        .layout()
                        .with_viewport(*viewport)
                        .and_then(|layout| scroller.set_layout(layout))
                        .map_err(|e| Error::Script {
                            line: *line,
                            message: e.to_string(),
                        })?;
                    report.outcome = Some(Outcome::Applied);
                }
            }
            steps.push(report);
        }
        Ok(Report {
            steps,
            snapshot: Snapshot::capture(scroller),
        })
    }
}

/// Tick until no animation is running; `None` if it never ends
pub fn settle(scroller: &mut Scroller<String>, frame: Duration) -> Option<usize> {
    let mut frames = 0;
    while scroller.task_state() == TaskState::Animating {
        if frames >= MAX_SETTLE_FRAMES {
            return None;
        }
        scroller.tick(frame);
        frames += 1;
    }
    Some(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScrollConfig;
    use crate::list::{IgnoreReason, LayoutConfig};

    const FRAME: Duration = Duration::from_millis(16);

    fn scroller(count: usize) -> Scroller<String> {
        let layout = LayoutConfig::new(330.0, 90.0, 10.0).unwrap();
        let items = (1..=count).map(|i| i.to_string()).collect();
        Scroller::new(layout, ScrollConfig::default(), items).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  # comment").unwrap(), None);
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(
            Command::parse("wheel -1 3").unwrap(),
            Some(Command::Wheel { delta: -1.0, times: 3 })
        );
        assert_eq!(
            Command::parse("goto 7 # jump").unwrap(),
            Some(Command::Goto("7".into()))
        );
        assert_eq!(Command::parse("tick").unwrap(), Some(Command::Tick(1)));
        assert_eq!(
            Command::parse("add hello world").unwrap(),
            Some(Command::Add("hello world".into()))
        );
        assert_eq!(Command::parse("resize 250").unwrap(), Some(Command::Resize(250.0)));
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        assert!(Command::parse("wheel").is_err());
        assert!(Command::parse("add").is_err());
        assert!(Command::parse("select two").is_err());

        let err = Script::parse("wheel -1\n\njump 4\n").unwrap_err();
        match err {
            Error::Script { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("jump"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_goto_and_settle() {
        let script = Script::parse("goto 7\nsettle\n").unwrap();
        let mut scroller = scroller(7);
        let report = script.run(&mut scroller, FRAME).unwrap();

        assert_eq!(report.steps[0].outcome, Some(Outcome::Started));
        assert!(report.steps[1].frames.unwrap() > 0);
        let snapshot = report.snapshot;
        assert_eq!(snapshot.top_index, 4);
        assert_eq!(snapshot.offset, 170.0);
        assert_eq!(snapshot.selected, Some(7));
        assert_eq!(snapshot.state, TaskState::Idle);
        assert!(snapshot.slots.iter().any(|s| s.selected && s.index == Some(7)));
    }

    #[test]
    fn test_edits_through_script() {
        let script = Script::parse(
            "update nothing\nselect 2\nupdate two\ndelete\nadd 8\ngoto abc\n",
        )
        .unwrap();
        let mut scroller = scroller(7);
        let report = script.run(&mut scroller, FRAME).unwrap();

        let outcomes: Vec<_> = report.steps.iter().map(|s| s.outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                Some(Outcome::Ignored(IgnoreReason::NoSelection)),
                Some(Outcome::Applied),
                Some(Outcome::Applied),
                Some(Outcome::Applied),
                Some(Outcome::Applied),
                Some(Outcome::Ignored(IgnoreReason::Unparsable)),
            ]
        );
        assert_eq!(report.snapshot.count, 7);
        assert_eq!(scroller.items()[1], "3");
        assert_eq!(scroller.items()[6], "8");
    }

    #[test]
    fn test_hash_inside_a_word_is_not_a_comment() {
        assert_eq!(
            Command::parse("add #1").unwrap(),
            Some(Command::Add("#1".into()))
        );
        assert_eq!(
            Command::parse("update a#b # rename").unwrap(),
            Some(Command::Update("a#b".into()))
        );
        assert_eq!(Command::parse("#wheel -1").unwrap(), None);
        assert_eq!(Command::parse("delete\t# drop it").unwrap(), Some(Command::Delete));
    }

    #[test]
    fn test_repeat_counts_are_capped() {
        assert_eq!(
            Command::parse("tick 100000").unwrap(),
            Some(Command::Tick(MAX_REPEAT))
        );
        assert!(Command::parse("tick 100001").is_err());
        assert!(Command::parse("tick 18446744073709551615").is_err());
        assert!(Command::parse("wheel -1 18446744073709551615").is_err());
        assert!(matches!(
            Script::parse("wheel 1\ntick 999999999\n"),
            Err(Error::Script { line: 2, .. })
        ));
    }

    #[test]
    fn test_invalid_resize_is_script_error() {
        let mut scroller = scroller(7);
        for source in ["resize -10\n", "resize 1e30\n"] {
            let script = Script::parse(source).unwrap();
            assert!(matches!(
                script.run(&mut scroller, FRAME),
                Err(Error::Script { line: 1, .. })
            ));
        }
        assert_eq!(scroller.layout().viewport_height(), 330.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = Snapshot::capture(&scroller(3));
        let rendered = toml::to_string(&snapshot.metrics).unwrap();
        assert!(rendered.contains("pool_size = 4"));
    }
}
