//! Typewriter Demo: Reveals chat answers with atomic math spans.
//!
//! This example plays a short conversation: one exchange loaded from
//! history (shown instantly), one answer revealed in full, and one
//! answer stopped halfway as if the user pressed "stop generating".
//!
//! Set `RUST_LOG=typewheel=debug` to watch the runs start and finish.

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor, Stylize};
use crossterm::{execute, queue};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use typewheel::widget::RevealState;
use typewheel::{RevealDriver, RevealEvent, Role, TerminalSink, Transcript};

const ANSWER: &str = r"Bayes' Theorem relates a conditional probability to its inverse:

$$P(A \mid B) = \frac{P(B \mid A)\,P(A)}{P(B)}$$

For example, if a test is $99\%$ sensitive and the disease prevalence is $p = 0.01$, a positive result still only gives about a $50\%$ chance of disease once false positives are accounted for.
";

const LONG_ANSWER: &str = r"The Central Limit Theorem says that the sample mean $\bar{X}_n$ of $n$ independent draws with mean $\mu$ and variance $\sigma^2$ is approximately normal, $\bar{X}_n \approx N(\mu, \sigma^2 / n)$, for large $n$, regardless of the shape of the original distribution. This is why so many test statistics are built on the normal distribution.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut stdout = io::stdout();
    execute!(
        stdout,
        Print("Typewheel Typewriter Demo\r\n".bold()),
        Print("=========================\r\n\r\n")
    )?;

    let mut driver = RevealDriver::new()?;
    let mut transcript = Transcript::new();
    let mut sink = TerminalSink::new(io::stdout());

    // History is revealed in one step
    transcript.load_history([
        (Role::User, "What is a p-value?"),
        (
            Role::Assistant,
            "The probability of data at least as extreme as observed, assuming $H_0$ holds.",
        ),
    ]);
    print_user_messages(&transcript, 0)?;
    transcript.sync(&mut driver)?;
    pump(&mut transcript, &driver, &mut sink, None);

    // A fresh question with a simulated backend delay
    ask(&mut transcript, "Explain Bayes' Theorem with a simple example")?;
    wait_for_backend(&transcript, Duration::from_millis(3200))?;
    transcript.receive_answer(Some(ANSWER));
    transcript.sync(&mut driver)?;
    pump(&mut transcript, &driver, &mut sink, None);

    // Stop the next answer partway through
    ask(&mut transcript, "Help me understand the Central Limit Theorem")?;
    wait_for_backend(&transcript, Duration::from_millis(1600))?;
    transcript.receive_answer(Some(LONG_ANSWER));
    transcript.sync(&mut driver)?;
    pump(&mut transcript, &driver, &mut sink, Some(Duration::from_millis(1500)));

    let stopped = transcript
        .messages()
        .iter()
        .filter(|message| matches!(message.state(), RevealState::Done(typewheel::Outcome::Stopped)))
        .count();
    execute!(
        stdout,
        Print(format!(
            "\r\nDone! {} messages, {} stopped early. Input enabled: {}\r\n",
            transcript.len(),
            stopped,
            transcript.input_enabled()
        ))
    )?;

    Ok(())
}

fn ask(transcript: &mut Transcript, question: &str) -> io::Result<()> {
    let before = transcript.len();
    transcript.submit(question);
    print_user_messages(transcript, before)
}

fn print_user_messages(transcript: &Transcript, from: usize) -> io::Result<()> {
    let mut stdout = io::stdout();
    for message in &transcript.messages()[from..] {
        if message.role() == Role::User {
            queue!(
                stdout,
                SetForegroundColor(Color::Rgb { r: 100, g: 200, b: 180 }),
                Print(format!("> {}\r\n", message.content())),
                ResetColor
            )?;
        }
    }
    stdout.flush()
}

/// Show the thinking indicator while the "backend" works.
fn wait_for_backend(transcript: &Transcript, latency: Duration) -> io::Result<()> {
    let mut stdout = io::stdout();
    let start = Instant::now();
    let mut last_stage = None;

    while start.elapsed() < latency {
        let stage = transcript.thinking_status(Instant::now());
        if stage != last_stage {
            if let Some(stage) = stage {
                queue!(
                    stdout,
                    Print("\r\x1b[2K"),
                    SetForegroundColor(Color::Rgb { r: 150, g: 150, b: 150 }),
                    Print(stage),
                    ResetColor
                )?;
                stdout.flush()?;
            }
            last_stage = stage;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    execute!(stdout, Print("\r\x1b[2K"))
}

/// Forward driver events to the transcript and the terminal until the
/// active run finishes. With `stop_after`, press "stop" after that long.
fn pump<W: Write>(
    transcript: &mut Transcript,
    driver: &RevealDriver,
    sink: &mut TerminalSink<W>,
    stop_after: Option<Duration>,
) {
    let start = Instant::now();
    let mut stop_pressed = false;

    loop {
        if let Some(limit) = stop_after {
            if !stop_pressed && start.elapsed() >= limit {
                transcript.stop_generating(driver);
                stop_pressed = true;
            }
        }

        match driver.wait_event(Duration::from_millis(50)) {
            Some(event) => {
                if transcript.apply(&event) {
                    event.deliver(sink);
                }
                if matches!(event, RevealEvent::Finished { .. }) && !driver.is_animating() {
                    // Pick up any skipped runs queued behind this one
                    for event in driver.drain_events() {
                        if transcript.apply(&event) {
                            event.deliver(sink);
                        }
                    }
                    return;
                }
            }
            None if !driver.is_animating() => return,
            None => {}
        }
    }
}
