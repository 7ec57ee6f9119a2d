use std::{
    collections::VecDeque,
    io::{self, BufRead, BufReader, Write},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, RecvTimeoutError, SyncSender},
    },
    thread,
    time::Duration,
};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::warn;

/// The services a running program needs from its environment.
///
/// The interpreter never touches stdout, stdin or a random source directly;
/// everything goes through the host it was created with.
pub trait Host {
    /// Appends one line to the program's transcript.
    fn print_line(&mut self, text: &str);

    /// Shows `prompt` and blocks until the user enters a line.
    ///
    /// Returns `None` when no line will arrive, either because input ended or
    /// because `running` was cleared while waiting. The caller treats both as
    /// an abort.
    fn read_line(&mut self, prompt: &str, running: &RunFlag) -> Option<String>;

    /// A uniform integer in `min..=max`. Callers guarantee `min <= max`.
    fn random_integer(&mut self, min: i64, max: i64) -> i64;

    /// A uniform float in `min..max`, or `min` when the bounds are equal.
    /// Callers guarantee finite bounds with `min <= max`.
    fn random_float(&mut self, min: f64, max: f64) -> f64;

    /// Gives the host a chance to run between long stretches of evaluation.
    fn pause(&mut self) {}
}

/// Whether a program is allowed to keep running.
///
/// Clones share one flag, so a clone handed to another thread can stop a run
/// in progress.
///
/// ```
/// use ocr_erl::interpreter::host::RunFlag;
///
/// let flag = RunFlag::default();
/// let remote = flag.clone();
/// flag.start();
/// remote.stop();
/// assert!(!flag.is_running());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    pub fn start(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

fn draw_integer(rng: &mut impl Rng, min: i64, max: i64) -> i64 {
    if min >= max { min } else { rng.gen_range(min..=max) }
}

fn draw_float(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    if min >= max { min } else { rng.gen_range(min..max) }
}

/// How often a pending `input` checks whether the run was stopped.
const INPUT_POLL: Duration = Duration::from_millis(50);

type InputLine = io::Result<String>;

/// A terminal host: prints to stdout, reads lines on a helper thread, and
/// draws from the thread-local generator.
///
/// Waiting for input watches the run flag, so stopping the run ends a pending
/// `input` even while the reader thread is still blocked.
pub struct StdioHost {
    reader: Option<Box<dyn BufRead + Send>>,
    lines:  Option<Receiver<InputLine>>,
}

impl Default for StdioHost {
    fn default() -> Self {
        Self::from_reader(BufReader::new(io::stdin()))
    }
}

impl StdioHost {
    /// A host reading its input from `reader` instead of stdin.
    #[must_use]
    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self { reader: Some(Box::new(reader)),
               lines:  None, }
    }

    /// The channel of input lines. The reader thread starts on first use.
    fn lines(&mut self) -> Option<&Receiver<InputLine>> {
        if self.lines.is_none()
           && let Some(reader) = self.reader.take()
        {
            let (sender, receiver) = mpsc::sync_channel(1);
            let spawned = thread::Builder::new().name("input".to_string())
                                                .spawn(move || forward_lines(reader, &sender));
            match spawned {
                Ok(_) => self.lines = Some(receiver),
                Err(error) => warn!(%error, "could not start the input thread"),
            }
        }
        self.lines.as_ref()
    }
}

/// Sends each line of `reader` until it ends or the receiving host is gone.
fn forward_lines(reader: impl BufRead, sender: &SyncSender<InputLine>) {
    for line in reader.lines() {
        if sender.send(line).is_err() {
            break;
        }
    }
}

impl Host for StdioHost {
    fn print_line(&mut self, text: &str) {
        println!("{text}");
    }

    fn read_line(&mut self, prompt: &str, running: &RunFlag) -> Option<String> {
        print!("{prompt}");
        if let Err(error) = io::stdout().flush() {
            warn!(%error, "could not flush prompt");
        }

        let lines = self.lines()?;
        while running.is_running() {
            match lines.recv_timeout(INPUT_POLL) {
                Ok(Ok(line)) => return running.is_running().then_some(line),
                Ok(Err(error)) => {
                    warn!(%error, "could not read input");
                    return None;
                },
                Err(RecvTimeoutError::Timeout) => {},
                Err(RecvTimeoutError::Disconnected) => return None,
            }
        }
        None
    }

    fn random_integer(&mut self, min: i64, max: i64) -> i64 {
        draw_integer(&mut rand::thread_rng(), min, max)
    }

    fn random_float(&mut self, min: f64, max: f64) -> f64 {
        draw_float(&mut rand::thread_rng(), min, max)
    }

    fn pause(&mut self) {
        thread::yield_now();
    }
}

/// A host that keeps its transcript in memory and answers input from a queue.
///
/// Input lines are echoed into the transcript after their prompt, as a
/// terminal would show them. Running out of queued input aborts the program.
///
/// # Example
/// ```
/// use ocr_erl::interpreter::{evaluator::core::Context, host::BufferedHost};
///
/// let mut context = Context::new(BufferedHost::with_inputs(["Ada"]));
/// assert_eq!(context.run("name = input(\"Name: \")\nprint(\"Hi\", name)"), 0);
/// assert_eq!(context.host().lines(),
///            ["Name: Ada", "Hi Ada", "✅ Exited successfully"]);
/// ```
#[derive(Debug)]
pub struct BufferedHost {
    lines:   Vec<String>,
    inputs:  VecDeque<String>,
    prompts: Vec<String>,
    rng:     StdRng,
}

impl Default for BufferedHost {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferedHost {
    #[must_use]
    pub fn new() -> Self {
        Self { lines:   Vec::new(),
               inputs:  VecDeque::new(),
               prompts: Vec::new(),
               rng:     StdRng::from_entropy(), }
    }

    /// Queues the lines later `input` calls will receive, in order.
    #[must_use]
    pub fn with_inputs<I, S>(inputs: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        let mut host = Self::new();
        host.inputs = inputs.into_iter().map(Into::into).collect();
        host
    }

    /// Makes `random` deterministic.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Every prompt shown by `input`, including empty ones.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Host for BufferedHost {
    fn print_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn read_line(&mut self, prompt: &str, running: &RunFlag) -> Option<String> {
        self.prompts.push(prompt.to_string());
        if !running.is_running() {
            return None;
        }
        let answer = self.inputs.pop_front()?;
        self.lines.push(format!("{prompt}{answer}"));
        Some(answer)
    }

    fn random_integer(&mut self, min: i64, max: i64) -> i64 {
        draw_integer(&mut self.rng, min, max)
    }

    fn random_float(&mut self, min: f64, max: f64) -> f64 {
        draw_float(&mut self.rng, min, max)
    }
}
