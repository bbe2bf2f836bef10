use w3mirror::{command_argument_builder, handle_mirror, parse_mirror_args, usage_exit_code};

#[tokio::main]
async fn main() {
    let matches = match command_argument_builder().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            std::process::exit(usage_exit_code(e.kind()));
        }
    };

    let args = match parse_mirror_args(&matches) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    handle_mirror(args).await;
}
