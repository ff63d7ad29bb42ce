use std::io::{self, BufRead, Write};
use std::thread;

use impacthub_domain::donation::{CheckoutRequest, DonationAmount, GatewayPayment};
use impacthub_infrastructure::gateway::{CheckoutCallback, CheckoutWidget};
use tracing::warn;

/// Checkout on the terminal: shows the order and asks for the payment id and
/// signature the hosted checkout page returned. An empty answer cancels.
pub struct TerminalCheckoutWidget;

impl CheckoutWidget for TerminalCheckoutWidget {
    fn present(&self, request: CheckoutRequest, callback: CheckoutCallback) {
        spawn_prompt(io::BufReader::new(io::stdin()), io::stdout(), request, callback);
    }
}

/// Run the prompt on a detached thread, outside the runtime's blocking pool,
/// so an unanswered read cannot hold up shutdown after the gateway gives up.
pub fn spawn_prompt<R, W>(
    mut input: R,
    mut output: W,
    request: CheckoutRequest,
    callback: CheckoutCallback,
) where
    R: BufRead + Send + 'static,
    W: Write + Send + 'static,
{
    let spawned = thread::Builder::new()
        .name("checkout-prompt".to_string())
        .spawn(move || match prompt_payment(&mut input, &mut output, &request) {
            Ok(Some(payment)) => callback.paid(payment),
            Ok(None) => callback.dismiss(),
            Err(e) => {
                warn!(error = %e, "Could not read checkout answer");
                callback.dismiss();
            }
        });

    // on failure the callback is dropped with the closure, which reads as a dismissal
    if let Err(e) = spawned {
        warn!(error = %e, "Could not start checkout prompt");
    }
}

pub fn prompt_payment(
    input: &mut impl BufRead,
    output: &mut impl Write,
    request: &CheckoutRequest,
) -> io::Result<Option<GatewayPayment>> {
    writeln!(
        output,
        "{} for {}: {} ({})",
        request.description,
        request.name,
        DonationAmount::from_minor_units(request.amount_minor_units),
        request.currency
    )?;
    writeln!(output, "Order {} (key {})", request.order_id, request.key)?;

    let Some(payment_id) = ask(input, output, "Payment id (empty to cancel): ")? else {
        return Ok(None);
    };
    let Some(signature) = ask(input, output, "Payment signature (empty to cancel): ")? else {
        return Ok(None);
    };

    Ok(Some(GatewayPayment {
        payment_id,
        order_id: request.order_id.clone(),
        signature,
    }))
}

fn ask(input: &mut impl BufRead, output: &mut impl Write, prompt: &str) -> io::Result<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use std::sync::mpsc;
    use std::time::Duration;

    use impacthub_domain::donation::GatewayOutcome;

    /// Input whose read blocks until the paired sender is dropped
    struct StalledInput(mpsc::Receiver<()>);

    impl Read for StalledInput {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            let _ = self.0.recv();
            Ok(0)
        }
    }

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            key: "rzp_test_key".to_string(),
            order_id: "order_1".to_string(),
            amount_minor_units: 25_050,
            currency: "INR".to_string(),
            name: "Clean Water".to_string(),
            description: "Support this project".to_string(),
        }
    }

    #[test]
    fn test_answers_become_payment() {
        let mut input = Cursor::new("pay_9\nsig_9\n");
        let mut output = Vec::new();

        let payment = prompt_payment(&mut input, &mut output, &request())
            .unwrap()
            .unwrap();

        assert_eq!(payment.payment_id, "pay_9");
        assert_eq!(payment.order_id, "order_1");
        assert_eq!(payment.signature, "sig_9");

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("₹250.50"));
        assert!(shown.contains("Clean Water"));
    }

    #[test]
    fn test_empty_answer_cancels() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();

        let payment = prompt_payment(&mut input, &mut output, &request()).unwrap();

        assert!(payment.is_none());
    }

    #[test]
    fn test_closed_input_cancels() {
        let mut input = Cursor::new("pay_9\n");
        let mut output = Vec::new();

        assert!(prompt_payment(&mut input, &mut output, &request())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_spawned_prompt_answers_through_callback() {
        let (callback, answer) = CheckoutCallback::pair();

        spawn_prompt(Cursor::new("pay_9\nsig_9\n"), io::sink(), request(), callback);

        match answer.blocking_recv().unwrap() {
            GatewayOutcome::Paid(payment) => assert_eq!(payment.payment_id, "pay_9"),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_unanswered_prompt_does_not_hold_runtime_shutdown() {
        let (_keep_stalled, stalled) = mpsc::channel::<()>();
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (callback, _answer) = CheckoutCallback::pair();

        runtime.block_on(async {
            spawn_prompt(
                io::BufReader::new(StalledInput(stalled)),
                io::sink(),
                request(),
                callback,
            );
        });

        let (done_tx, done_rx) = mpsc::channel();
        thread::spawn(move || {
            drop(runtime);
            let _ = done_tx.send(());
        });

        assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }
}
