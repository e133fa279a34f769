/**
 * tuixc
 *
 * Compiles `.tui.xaml` documents into `.g.cs` partial classes
 */
use std::process;
use tui_xaml_compiler_cli::main_entry::main_fn;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let code = main_fn(&args, |out| println!("{}", out), |err| eprintln!("{}", err));
    process::exit(code);
}
