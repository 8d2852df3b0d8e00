//! Frame delivery into a session and event delivery out of it.

use crate::{
    error::Error,
    landmark::Landmark,
    session::{Event, TrackingSession},
};
use serde::{Deserialize, Serialize};
use std::{
    io::{BufRead, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, RecvTimeoutError},
    },
    time::Duration,
};

/// One tracker result: zero or more hands seen at `timestamp_ms`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub timestamp_ms: f64,
    #[serde(default)]
    pub hands: Vec<Vec<Landmark>>,
}

impl Frame {
    pub fn timestamp(&self) -> Duration {
        // saturating cast: negative and NaN land on zero
        Duration::from_nanos((self.timestamp_ms * 1e6).round() as u64)
    }

    /// Only the first hand drives the pointer.
    pub fn hand(&self) -> Option<&[Landmark]> {
        self.hands.first().map(Vec::as_slice)
    }
}

/// Anything that can hand frames to a session, one at a time.
pub trait FrameSource {
    /// `Ok(None)` means the source is exhausted.
    fn next_frame(&mut self) -> Result<Option<Frame>, Error>;
}

/// Newline delimited JSON frames. Blank lines are skipped.
pub struct JsonLinesSource<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> FrameSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>, Error> {
        loop {
            self.buf.clear();
            self.line += 1;
            let read = self
                .reader
                .read_line(&mut self.buf)
                .map_err(|e| Error::ReadFrame(e, self.line))?;
            if read == 0 {
                return Ok(None);
            }

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }

            let frame: Frame =
                serde_json::from_str(text).map_err(|e| Error::ParseFrame(e, self.line))?;
            if !(frame.timestamp_ms.is_finite() && frame.timestamp_ms >= 0.0) {
                return Err(Error::InvalidTimestamp(frame.timestamp_ms, self.line));
            }
            return Ok(Some(frame));
        }
    }
}

/// Consumer of session events.
pub trait EventSink {
    fn emit(&mut self, timestamp: Duration, event: &Event) -> Result<(), Error>;
}

#[derive(Serialize)]
struct Record<'a> {
    timestamp_ms: f64,
    #[serde(flatten)]
    event: &'a Event,
}

/// Writes one JSON object per event.
pub struct JsonLinesSink<W> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn emit(&mut self, timestamp: Duration, event: &Event) -> Result<(), Error> {
        let record = Record {
            timestamp_ms: timestamp.as_nanos() as f64 / 1e6,
            event,
        };
        serde_json::to_writer(&mut self.writer, &record).map_err(Error::SerializeEvent)?;
        self.writer.write_all(b"\n").map_err(Error::WriteEvent)
    }
}

impl EventSink for Vec<(Duration, Event)> {
    fn emit(&mut self, timestamp: Duration, event: &Event) -> Result<(), Error> {
        self.push((timestamp, *event));
        Ok(())
    }
}

/// Pump every frame from `source` through `session` into `sink`, on the
/// calling thread. Returns the number of frames processed.
pub fn drive<S, K>(
    source: &mut S,
    session: &mut TrackingSession,
    sink: &mut K,
) -> Result<usize, Error>
where
    S: FrameSource,
    K: EventSink,
{
    let mut frames = 0;
    while let Some(frame) = source.next_frame()? {
        let timestamp = frame.timestamp();
        for event in session.process_frame(&frame) {
            sink.emit(timestamp, &event)?;
        }
        frames += 1;
    }
    Ok(frames)
}

/// Like [`drive`], but fed from a channel by another thread. Stops when the
/// sender hangs up or `running` is cleared; the flag is checked at least every
/// `poll` even while no frame arrives. `on_frame` sees the session after each
/// frame.
pub fn pump<K, F>(
    frames: &Receiver<Frame>,
    session: &mut TrackingSession,
    sink: &mut K,
    running: &AtomicBool,
    poll: Duration,
    mut on_frame: F,
) -> Result<usize, Error>
where
    K: EventSink,
    F: FnMut(&TrackingSession),
{
    let mut nframes = 0;
    while running.load(Ordering::SeqCst) {
        let frame = match frames.recv_timeout(poll) {
            Ok(frame) => frame,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        let timestamp = frame.timestamp();
        for event in session.process_frame(&frame) {
            sink.emit(timestamp, &event)?;
        }
        nframes += 1;
        on_frame(session);
    }
    Ok(nframes)
}

#[cfg(test)]
mod tests {
    use super::{drive, pump, EventSink, Frame, FrameSource, JsonLinesSink, JsonLinesSource};
    use crate::{
        error::Error,
        gesture::Gesture,
        landmark::{fixtures, Landmark},
        session::{Action, Event, TrackingSession},
    };
    use std::{
        io::Cursor,
        sync::{
            atomic::{AtomicBool, Ordering},
            mpsc::channel,
        },
        thread,
        time::Duration,
    };

    fn line(timestamp_ms: f64, hand: Option<Vec<Landmark>>) -> String {
        serde_json::to_string(&Frame {
            timestamp_ms,
            hands: hand.into_iter().collect(),
        })
        .unwrap()
    }

    #[test]
    fn reads_frames_and_skips_blank_lines() {
        let input = format!("{}\n\n{}\n", line(0.0, None), line(33.0, Some(fixtures::fist())));
        let mut source = JsonLinesSource::new(Cursor::new(input));

        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.hand(), None);
        let second = source.next_frame().unwrap().unwrap();
        assert_eq!(second.timestamp(), Duration::from_millis(33));
        assert_eq!(second.hand().map(<[Landmark]>::len), Some(21));
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn hands_and_optional_fields_default() {
        let mut source = JsonLinesSource::new(Cursor::new(
            r#"{"timestamp_ms": 5, "hands": [[{"x": 0.1, "y": 0.2}]]}"#,
        ));
        let frame = source.next_frame().unwrap().unwrap();
        let hand = frame.hand().unwrap();
        assert_eq!(hand[0].z, 0.0);
        assert_eq!(hand[0].visibility, None);
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let input = format!("{}\nnot json\n", line(0.0, None));
        let mut source = JsonLinesSource::new(Cursor::new(input));
        source.next_frame().unwrap();
        match source.next_frame() {
            Err(Error::ParseFrame(_, at)) => assert_eq!(at, 2),
            other => panic!("expected ParseFrame, got {:?}", other),
        }
    }

    #[test]
    fn negative_timestamp_is_rejected() {
        let mut source = JsonLinesSource::new(Cursor::new(r#"{"timestamp_ms": -1}"#));
        assert!(matches!(
            source.next_frame(),
            Err(Error::InvalidTimestamp(_, 1))
        ));
    }

    #[test]
    fn thumbs_up_stream_detects_once() {
        let input = (0..3)
            .map(|i| line(f64::from(i) * 33.0, Some(fixtures::thumbs_up())))
            .collect::<Vec<_>>()
            .join("\n");
        let mut source = JsonLinesSource::new(Cursor::new(input));
        let mut session = TrackingSession::default();
        let mut events: Vec<(Duration, Event)> = Vec::new();

        let frames = drive(&mut source, &mut session, &mut events).unwrap();
        assert_eq!(frames, 3);
        assert_eq!(session.gesture(), Gesture::ThumbsUp);

        let detects = events
            .iter()
            .filter(|(_, e)| {
                matches!(
                    e,
                    Event::Action {
                        action: Action::Detect,
                        ..
                    }
                )
            })
            .map(|(t, _)| *t)
            .collect::<Vec<_>>();
        assert_eq!(detects, vec![Duration::from_millis(0)]);
    }

    #[test]
    fn sink_writes_one_record_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.emit(Duration::from_millis(40), &Event::DragEnded).unwrap();
        sink.emit(Duration::from_millis(80), &Event::Zoomed { zoom: 2.0 })
            .unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"timestamp_ms":40.0,"event":"drag_ended"}"#);
        assert_eq!(
            lines[1],
            r#"{"timestamp_ms":80.0,"event":"zoomed","zoom":2.0}"#
        );
    }

    #[test]
    fn pump_runs_until_sender_hangs_up() {
        let (tx, rx) = channel();
        for i in 0..3 {
            tx.send(Frame {
                timestamp_ms: f64::from(i) * 33.0,
                hands: vec![fixtures::fist()],
            })
            .unwrap();
        }
        drop(tx);

        let running = AtomicBool::new(true);
        let mut session = TrackingSession::default();
        let mut events: Vec<(Duration, Event)> = Vec::new();
        let mut seen = 0;
        let nframes = pump(
            &rx,
            &mut session,
            &mut events,
            &running,
            Duration::from_millis(5),
            |_| seen += 1,
        )
        .unwrap();
        assert_eq!(nframes, 3);
        assert_eq!(seen, 3);
        assert_eq!(session.gesture(), Gesture::Fist);
    }

    #[test]
    fn pump_stops_on_flag_while_input_is_idle() {
        // sender stays alive and silent, as with an idle terminal on stdin
        let (_tx, rx) = channel::<Frame>();
        let running = AtomicBool::new(true);
        let mut session = TrackingSession::default();
        let mut events: Vec<(Duration, Event)> = Vec::new();

        let nframes = crossbeam::thread::scope(|scope| {
            scope.spawn(|_| {
                thread::sleep(Duration::from_millis(20));
                running.store(false, Ordering::SeqCst);
            });
            pump(
                &rx,
                &mut session,
                &mut events,
                &running,
                Duration::from_millis(5),
                |_| {},
            )
        })
        .unwrap()
        .unwrap();
        assert_eq!(nframes, 0);
        assert!(events.is_empty());
    }
}
