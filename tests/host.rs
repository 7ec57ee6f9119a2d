use std::{
    io::{self, BufReader, Read},
    thread,
    time::Duration,
};

use ocr_erl::interpreter::{
    evaluator::core::{Context, SUCCESS_MARKER},
    host::{BufferedHost, Host, RunFlag, StdioHost},
};

/// Input that never arrives.
struct Silent;

impl Read for Silent {
    fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
        loop {
            thread::park();
        }
    }
}

fn running() -> RunFlag {
    let flag = RunFlag::default();
    flag.start();
    flag
}

#[test]
fn stdio_host_reads_lines_without_their_endings() {
    let mut host = StdioHost::from_reader(&b"Ada\r\n12\n"[..]);
    let flag = running();
    assert_eq!(host.read_line("", &flag).as_deref(), Some("Ada"));
    assert_eq!(host.read_line("", &flag).as_deref(), Some("12"));
    assert_eq!(host.read_line("", &flag), None);
}

#[test]
fn stopping_the_run_ends_a_pending_read() {
    let mut host = StdioHost::from_reader(BufReader::new(Silent));
    let flag = running();
    let remote = flag.clone();
    let stopper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        remote.stop();
    });

    assert_eq!(host.read_line("Name: ", &flag), None);
    stopper.join().unwrap();
}

#[test]
fn a_stopped_run_reads_nothing() {
    let mut host = StdioHost::from_reader(&b"unused\n"[..]);
    assert_eq!(host.read_line("", &RunFlag::default()), None);

    let mut buffered = BufferedHost::with_inputs(["unused"]);
    assert_eq!(buffered.read_line("", &RunFlag::default()), None);
}

#[test]
fn programs_read_from_any_reader() {
    let mut context = Context::new(StdioHost::from_reader(&b"7\n"[..]));
    assert_eq!(context.run("n = int(input())\nif n * 6 != 42 then\n    x = 1 / 0\nendif"), 0);

    let mut context = Context::new(BufferedHost::with_inputs(["7"]));
    context.run("n = int(input())\nprint(n * 6)");
    assert_eq!(context.host().lines(), ["7", "42", SUCCESS_MARKER]);
}
