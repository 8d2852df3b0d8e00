use anyhow::{anyhow, Context, Result};
use gesture_pointer::{
    source::{pump, FrameSource, JsonLinesSink, JsonLinesSource},
    Config, Error, TrackingSession,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::channel,
        Arc,
    },
    time::Duration,
};
use structopt::StructOpt;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;

/// How often the processor checks for Ctrl-C while no frame arrives.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(structopt::StructOpt)]
struct Opt {
    /// Newline delimited JSON hand tracker frames. Reads stdin when omitted.
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,

    /// Write events to this file instead of stdout.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    #[structopt(short, long, default_value = "info", env = "RUST_LOG")]
    log_level: tracing_subscriber::filter::EnvFilter,

    #[structopt(short, long)]
    show_progress: bool,

    #[structopt(flatten)]
    config: Config,
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead + Send>, Error> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).map_err(|e| Error::OpenInput(e, path.to_path_buf()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("failed to create {:?}", path))?,
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    })
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    // stdout carries events, keep logs off it
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(opt.log_level),
    )?;

    let input = open_input(opt.input.as_deref()).context("failed opening frame input")?;
    let writer = open_output(opt.output.as_deref())?;

    let running = Arc::new(AtomicBool::new(true));
    let running_ctrl_c = running.clone();

    // a second Ctrl-C gives up on a clean shutdown, e.g. when the writer is stuck
    ctrlc::set_handler(move || {
        if !running_ctrl_c.swap(false, Ordering::SeqCst) {
            std::process::exit(130);
        }
    })
    .context("failed setting Ctrl-C handler")?;

    let progress = if opt.show_progress {
        Some(
            ProgressBar::new_spinner().with_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
                    .template("{prefix:.bold.dim} {spinner} {wide_msg}"),
            ),
        )
    } else {
        None
    };

    let mut session = TrackingSession::new(opt.config);
    info!(config = ?session.config(), "starting tracking session");

    let (frames_tx, frames_rx) = channel();
    let running_read = running.clone();

    // not scoped: a read blocked on idle input must not hold up shutdown
    let reader = std::thread::Builder::new()
        .name("frame-reader".to_owned())
        .spawn(move || {
            let mut source = JsonLinesSource::new(input);
            while running_read.load(Ordering::SeqCst) {
                match source.next_frame()? {
                    Some(frame) => {
                        if frames_tx.send(frame).is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
            Ok::<_, Error>(())
        })
        .context("failed to spawn frame reader thread")?;

    let session_ref = &mut session;
    let running_process = &*running;

    let nframes = crossbeam::thread::scope(|scope| {
        let processor = scope.spawn(move |_| {
            let mut sink = JsonLinesSink::new(writer);
            let nframes = pump(
                &frames_rx,
                session_ref,
                &mut sink,
                running_process,
                POLL_INTERVAL,
                |session| {
                    if let Some(progress) = progress.as_ref() {
                        let snapshot = session.snapshot();
                        progress.set_message(format!(
                            "FPS: {}, gesture: {}, zoom: {:.0}%",
                            snapshot.fps,
                            snapshot.gesture,
                            snapshot.zoom * 100.0,
                        ));
                        progress.inc(1);
                    }
                },
            );

            if let Some(progress) = progress {
                progress.finish_and_clear();
            }
            // flush whatever was written, even when processing failed
            let flushed = sink.into_inner().flush().map_err(Error::WriteEvent);
            let nframes = nframes?;
            flushed?;
            Ok::<_, Error>(nframes)
        });

        processor
            .join()
            .map_err(|_| anyhow!("frame processor thread panicked"))?
            .context("failed processing frames")
    })
    .map_err(|_| anyhow!("frame processor thread panicked"))??;

    if running.load(Ordering::SeqCst) {
        reader
            .join()
            .map_err(|_| anyhow!("frame reader thread panicked"))?
            .context("failed reading frames")?;
    } else {
        info!("interrupted, not waiting on frame input");
    }

    debug!(snapshot = ?session.snapshot(), "final state");
    info!(frames = nframes, "stream finished");
    Ok(())
}
