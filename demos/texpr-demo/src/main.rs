use std::{cell::RefCell, process::ExitCode};

use clap::Parser;
use log::{LevelFilter, error, info};
use texpr::prelude::*;

/// Builds `z = a + b + 9 * a` out of labelled sums, evaluates it, rebinds `b` and
/// evaluates again.
#[derive(Debug, Parser)]
#[command(name = "texpr-demo", version, about)]
struct Args {
    /// Value of the leaf `a`.
    #[arg(long, default_value_t = 500)]
    leaf: i64,

    /// Initial value of the variable `b`.
    #[arg(long, default_value_t = 44)]
    alias: i64,

    /// Value written to the storage of `b` before the second evaluation.
    #[arg(long, default_value_t = 33)]
    update: i64,

    /// Bind `b` to a private copy instead of aliasing its storage.
    #[arg(long)]
    shared: bool,

    /// Pretty print the expression with colors instead of the plain rendering.
    #[arg(long)]
    pretty: bool,

    /// Log engine decisions (erasures, dispatches).
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> ExpResult<()> {
    let a = SimpleSpace::new(args.leaf);
    let storage = RefCell::new(SimpleSpace::new(args.alias));
    let b = if args.shared {
        Variable::shared(&*storage.borrow())
    } else {
        Variable::aliased(&storage)
    };
    info!("Variable `b` is bound in {} mode", b.mode());

    let c = a + b;
    let d = name("d", c + a);
    let e = name("e", d + a);
    let f = name("f", e + a);
    let g = name("g", f + a);
    let h = name("h", g + a);
    let i = name("i", h + a);
    let x = name("x", i + a);
    let y = name("y", x + a);
    let z = name("z", y + a);

    if args.pretty {
        z.pretty_print()?;
        println!();
    } else {
        println!("{}", z.render()?);
    }

    let tree = stats(&z)?;
    info!(
        "Tree has {} nodes, depth {}, {} erased boundaries",
        tree.nodes, tree.depth, tree.erased
    );

    println!("z = {}", z.eval()?);
    storage.borrow_mut().set_value(args.update);
    println!("b <- {}", args.update);
    println!("z = {}", z.eval()?);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
