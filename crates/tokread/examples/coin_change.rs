//! Largest amount payable with unlimited coins, up to a limit.
//!
//! Input: a test count `t`, then for each test `n k` followed by `n` coin
//! values. For each test, prints the largest amount `<= k` that is a sum of
//! coins (repetition allowed), or `0` if none is.
//!
//! ```text
//! 1
//! 3 10
//! 1 2 5
//! ```
//!
//! Run with
//!
//! ```bash
//! cargo run -p tokread --example coin_change -- input.txt
//! echo "1 3 10 1 2 5" | cargo run -p tokread --example coin_change
//! ```
//!
//! Set `RUST_LOG=tokread=trace` to watch buffer refills.

use std::{
    error::Error,
    io::{Read, Write},
};

use tokread::{Printer, TokenReader, measure};
use tracing_subscriber::EnvFilter;

fn largest_payable(coins: &[i32], limit: usize) -> usize {
    let mut payable = vec![false; limit + 1];
    payable[0] = true;
    for &coin in coins {
        let Ok(coin) = usize::try_from(coin) else {
            continue;
        };
        if coin == 0 {
            continue;
        }
        for amount in coin..=limit {
            if payable[amount - coin] {
                payable[amount] = true;
            }
        }
    }
    payable.iter().rposition(|&p| p).unwrap_or(0)
}

fn solve<R: Read, W: Write>(
    input: &mut TokenReader<R>,
    out: &mut Printer<W>,
) -> Result<(), Box<dyn Error>> {
    let tests = input.next_int()?;
    for _ in 0..tests {
        let n = usize::try_from(input.next_int()?)?;
        let limit = usize::try_from(input.next_int()?)?;
        let coins = input.next_int_array(n)?;
        out.print(largest_payable(&coins, limit))?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut out = Printer::stdout();
    let mut stdout = std::io::stdout();
    measure(&mut stdout, || -> Result<(), Box<dyn Error>> {
        match std::env::args_os().nth(1) {
            Some(path) => solve(&mut TokenReader::open(path)?, &mut out)?,
            None => solve(&mut TokenReader::stdin()?, &mut out)?,
        }
        out.flush()?;
        Ok(())
    })?
}
