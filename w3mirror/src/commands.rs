use crate::CLAP_STYLING;
use clap::arg;
use url::Url;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("w3mirror")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("w3mirror")
        .about("Mirror a web page and its static assets to web3.storage")
        .styles(CLAP_STYLING)
        .arg(
            arg!(<EMAIL>)
                .required(true)
                .help("Email address of the web3.storage account"),
        )
        .arg(
            arg!(<SPACE>)
                .required(true)
                .help("DID of the space to upload into"),
        )
        .arg(
            arg!(<URL>)
                .required(true)
                .help("The page to mirror")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(-d --"staging-dir" <PATH>)
                .required(false)
                .help("Directory the page and its assets are staged in (cleared on every run)")
                .default_value("./assets"),
        )
        .arg(
            arg!(--"w3-bin" <PATH>)
                .required(false)
                .help("Path to the w3 client (default: looked up on PATH)")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            arg!(-t --"timeout" <SECONDS>)
                .required(false)
                .help("Per-request timeout in seconds (default: none)")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            arg!(-q --"quiet" "Only print the gateway URL and warnings")
                .required(false)
                .conflicts_with("verbose"),
        )
        .arg(arg!(-v --"verbose" "Enable debug logging").required(false))
}
