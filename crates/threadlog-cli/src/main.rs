mod pipe;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use crossbeam_channel::unbounded;
use threadlog_core::{
    assign_thread_name, load_config, load_config_strict, logd, logi, logw, ColorMode, Format,
    Level, Logger, LoggerConfig, Threshold,
};

const USAGE: &str = "usage: threadlog [--config <path>] [--strict] [--name <name>] \
[--level <level|off>] [--format plain|structured] [--color auto|always|never] \
[--at <level>] [--pipe | --demo <threads> | --print-config] [message...]";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    strict: bool,
    name: Option<String>,
    level: Option<Threshold>,
    format: Option<Format>,
    color: Option<ColorMode>,
    at: Option<Level>,
    pipe: bool,
    demo: Option<usize>,
    print_config: bool,
    help: bool,
    message: Vec<String>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut out = Args::default();
    let mut it = args.into_iter();
    while let Some(a) = it.next() {
        let mut value = || it.next().ok_or_else(|| anyhow!("{a} needs a value\n{USAGE}"));
        match a.as_str() {
            "--config" => out.config = Some(PathBuf::from(value()?)),
            "--strict" => out.strict = true,
            "--name" => out.name = Some(value()?),
            "--level" => out.level = Some(value()?.parse()?),
            "--format" => out.format = Some(value()?.parse()?),
            "--color" => out.color = Some(value()?.parse()?),
            "--at" => out.at = Some(value()?.parse()?),
            "--pipe" => out.pipe = true,
            "--demo" => {
                let v = value()?;
                let n = v
                    .parse()
                    .with_context(|| format!("--demo expects a thread count, got {v:?}"))?;
                out.demo = Some(n);
            }
            "--print-config" => out.print_config = true,
            "--help" | "-h" => out.help = true,
            s if s.starts_with("--") => bail!("unknown flag {s}\n{USAGE}"),
            _ => out.message.push(a.clone()),
        }
    }
    if out.pipe && out.demo.is_some() {
        bail!("--pipe and --demo are exclusive\n{USAGE}");
    }
    Ok(out)
}

/// File (flag or `THREADLOG_CONFIG`), then `THREADLOG_*` overrides, then flags.
fn effective_config(args: &Args) -> Result<LoggerConfig> {
    let path = args.config.clone().or_else(|| {
        std::env::var("THREADLOG_CONFIG")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
    });

    let mut cfg = match &path {
        Some(p) if args.strict => load_config_strict(p)?,
        Some(p) => load_config(p)?,
        None => LoggerConfig::default(),
    };
    cfg.apply_env()?;
    apply_flags(&mut cfg, args);
    Ok(cfg)
}

fn apply_flags(cfg: &mut LoggerConfig, args: &Args) {
    if let Some(name) = &args.name {
        cfg.name = name.clone();
    }
    if cfg.name.is_empty() {
        cfg.name = "threadlog".to_string();
    }
    if let Some(level) = args.level {
        cfg.level = level;
    }
    if let Some(format) = args.format {
        cfg.format = format;
    }
    if let Some(color) = args.color {
        cfg.color = color;
    }
}

/// Spawn `threads` named workers that log through one shared logger.
fn run_demo(log: &Arc<Logger>, threads: usize) -> Result<()> {
    let (tx, rx) = unbounded::<(String, usize)>();
    let mut joins = Vec::with_capacity(threads);

    for i in 0..threads {
        let log = Arc::clone(log);
        let tx = tx.clone();
        let label = format!("worker-{i}");
        joins.push(
            std::thread::Builder::new()
                .name(label.clone())
                .spawn(move || {
                    let name = log.registry().assign(label.clone());
                    let mut sent = 0;
                    for step in 0..3 {
                        logi!(log, "step {step} of 3");
                        sent += 1;
                    }
                    logd!(log, "done");
                    sent += 1;
                    name.release();
                    let _ = tx.send((label, sent));
                })?,
        );
    }
    drop(tx);

    let mut total = 0;
    for (label, sent) in rx.iter() {
        logd!(log, "{label} finished after {sent} calls");
        total += sent;
    }
    for j in joins {
        if j.join().is_err() {
            logw!(log, "a demo worker panicked");
        }
    }
    logi!(log, "demo: {threads} threads, {total} log calls");
    Ok(())
}

fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }
    let cfg = effective_config(&args)?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    let log = Arc::new(cfg.build().context("building logger")?);
    let main_name = assign_thread_name("main");
    logd!(log, "logger {:?} ready ({:?}, threshold {})", log.name(), log.format(), log.threshold());

    let at = args.at.unwrap_or(Level::Info);
    if args.pipe {
        let n = pipe::spawn_pipe_thread("stdin", Arc::clone(&log), std::io::stdin(), at)?
            .join()
            .map_err(|_| anyhow!("stdin pipe thread panicked"))?;
        logd!(log, "piped {n} lines");
    } else if let Some(threads) = args.demo {
        run_demo(&log, threads)?;
    } else if args.message.is_empty() {
        bail!("nothing to log\n{USAGE}");
    } else {
        log.log(at, &args.message.join(" "), None);
    }

    main_name.release();
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("threadlog: {e:#}");
        std::process::exit(1);
    }
}
