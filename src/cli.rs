use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use chrono_tz::Tz;
use getopts::Options;

pub struct Args {
    pub address: SocketAddr,
    pub config: PathBuf,
    pub timezone: Tz,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "a",
        "address",
        "Socket address (IP and port) to listen on [Default: 127.0.0.1:8080]",
        "SOCKET_ADDRESS",
    );
    opts.optopt(
        "f",
        "config",
        "Path to the site configuration document [Default: data/site.json]",
        "FILE",
    );
    opts.optopt(
        "z",
        "timezone",
        "IANA timezone the event times are authored in [Default: Asia/Kolkata]",
        "TIMEZONE",
    );
    opts
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
        process::exit(0);
    }

    let address = match matches.opt_get_default("address", SocketAddr::from(([127, 0, 0, 1], 8080)))
    {
        Ok(address) => address,
        Err(err) => {
            eprintln!("Provided value for option 'address' is invalid: {err}");
            process::exit(1);
        }
    };

    let config = match matches.opt_get_default("config", PathBuf::from("data/site.json")) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Provided value for option 'config' is invalid: {err}");
            process::exit(1);
        }
    };

    let timezone = match matches.opt_get_default("timezone", chrono_tz::Asia::Kolkata) {
        Ok(timezone) => timezone,
        Err(err) => {
            eprintln!("Provided value for option 'timezone' is invalid: {err}");
            process::exit(1);
        }
    };

    Args {
        address,
        config,
        timezone,
    }
}
