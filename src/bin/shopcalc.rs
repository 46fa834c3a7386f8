use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use shopcalc::report::item_line;
use shopcalc::{config, Operator, ShopCalc, ShopCalcError};

#[derive(Parser, Debug)]
#[clap(name = "shopcalc", version, about = "Shopping list manager with a calculator")]
struct Cli {
    #[clap(long, help = "List data file (defaults to ./shopping_list.json)")]
    data_file: Option<PathBuf>,

    #[clap(
        long,
        conflicts_with = "data_file",
        help = "Keep the list in the per-user data directory"
    )]
    user_data: bool,

    #[clap(long, help = "Do not save the list after every change")]
    no_auto_save: bool,

    #[clap(long, help = "Start with an empty list instead of loading the data file")]
    no_auto_load: bool,

    #[clap(long, short, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Warn);

    // Logs go to stderr so they never interleave with the menu on stdout.
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .target(env_logger::Target::Stderr)
        .init();

    let mut builder = ShopCalc::builder()
        .auto_save(!cli.no_auto_save)
        .auto_load(!cli.no_auto_load);
    if let Some(path) = cli.data_file {
        builder = builder.data_file(path);
    } else if cli.user_data {
        builder = builder.data_file(config::user_data_file());
    }
    let app = builder.build();
    log::debug!("Starting {app}");

    spawn_interrupt_handler();

    // Stdout stays unlocked between writes so the interrupt handler can
    // print the farewell while the shell waits for input.
    let stdin = io::stdin();
    let mut shell = Shell::new(app, stdin.lock(), io::stdout());
    match shell.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Terminal I/O failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Print the farewell and exit successfully on Ctrl-C. Every list change
/// has already been auto-saved, so there is nothing left to flush.
fn spawn_interrupt_handler() {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::warn!("Ctrl-C handler unavailable: {e}");
            return;
        }
    };
    std::thread::spawn(move || match runtime.block_on(tokio::signal::ctrl_c()) {
        Ok(()) => {
            let mut out = io::stdout();
            let _ = writeln!(out);
            let _ = farewell(&mut out);
            std::process::exit(0);
        }
        Err(e) => log::warn!("Ctrl-C handler failed: {e}"),
    });
}

fn farewell<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Goodbye!")?;
    out.flush()
}

// ---------------------------------------------------------------------------
// Shell
// ---------------------------------------------------------------------------

enum Flow {
    Continue,
    Quit,
}

/// Line-oriented menu loop over any reader/writer pair.
struct Shell<R, W> {
    app: ShopCalc,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    fn new(app: ShopCalc, input: R, out: W) -> Self {
        Self { app, input, out }
    }

    fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "Shopping list & calculator")?;
        let (pending, completed) = (self.app.list().len(), self.app.list().completed_len());
        if pending + completed > 0 {
            writeln!(
                self.out,
                "Loaded saved list: {pending} pending, {completed} completed"
            )?;
        }

        loop {
            writeln!(self.out)?;
            writeln!(self.out, "{}", "=".repeat(40))?;
            writeln!(self.out, "1. Calculator")?;
            writeln!(self.out, "2. Shopping list")?;
            writeln!(self.out, "3. Save list")?;
            writeln!(self.out, "4. Load list")?;
            writeln!(self.out, "5. Export list as text")?;
            writeln!(self.out, "6. Quit")?;

            let Some(choice) = self.prompt("Choose (1-6): ")? else {
                break;
            };
            let flow = match choice.as_str() {
                "1" => self.calculator_menu()?,
                "2" => self.list_menu()?,
                "3" => self.save_list()?,
                "4" => self.load_list()?,
                "5" => self.export_list()?,
                "6" => Flow::Quit,
                _ => {
                    writeln!(self.out, "Invalid choice. Enter a number from 1 to 6.")?;
                    Flow::Continue
                }
            };
            if let Flow::Quit = flow {
                break;
            }
        }

        farewell(&mut self.out)
    }

    /// Print `msg` and read one trimmed line. `None` means end of input.
    fn prompt(&mut self, msg: &str) -> io::Result<Option<String>> {
        write!(self.out, "{msg}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report_error(&mut self, context: &str, err: &ShopCalcError) -> io::Result<()> {
        writeln!(self.out, "{context}: {err}")
    }

    // -- Calculator ----------------------------------------------------------

    fn calculator_menu(&mut self) -> io::Result<Flow> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "--- Calculator ---")?;
            writeln!(self.out, "1. Simple calculation")?;
            writeln!(self.out, "2. Expression")?;
            writeln!(self.out, "3. Show history")?;
            writeln!(self.out, "4. Clear history")?;
            writeln!(self.out, "5. Back")?;

            let Some(choice) = self.prompt("Choose (1-5): ")? else {
                return Ok(Flow::Quit);
            };
            match choice.as_str() {
                "1" => {
                    if let Flow::Quit = self.simple_calculation()? {
                        return Ok(Flow::Quit);
                    }
                }
                "2" => {
                    let Some(expression) = self.prompt("Expression (e.g. 100 + 200 * 1.08): ")?
                    else {
                        return Ok(Flow::Quit);
                    };
                    match self.app.calculator_mut().evaluate(&expression) {
                        Ok(result) => writeln!(self.out, "Result: {result}")?,
                        Err(e) => self.report_error("Calculation error", &e)?,
                    }
                }
                "3" => {
                    let history = self.app.calculator().history();
                    if history.is_empty() {
                        writeln!(self.out, "No calculations yet")?;
                    } else {
                        writeln!(self.out, "=== History ===")?;
                        for (i, record) in history.iter().enumerate() {
                            writeln!(self.out, "{}. {record}", i + 1)?;
                        }
                    }
                }
                "4" => {
                    self.app.calculator_mut().clear_history();
                    writeln!(self.out, "History cleared")?;
                }
                "5" => return Ok(Flow::Continue),
                _ => writeln!(self.out, "Invalid choice. Enter a number from 1 to 5.")?,
            }
        }
    }

    fn simple_calculation(&mut self) -> io::Result<Flow> {
        let Some(a) = self.prompt("First number: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(op) = self.prompt("Operator (+, -, ×, ÷): ")? else {
            return Ok(Flow::Quit);
        };
        let Some(b) = self.prompt("Second number: ")? else {
            return Ok(Flow::Quit);
        };

        let (Ok(a), Ok(b)) = (a.parse::<f64>(), b.parse::<f64>()) else {
            writeln!(self.out, "Input error: not a number")?;
            return Ok(Flow::Continue);
        };
        let result = op
            .parse::<Operator>()
            .and_then(|op| self.app.calculator_mut().apply(a, op, b));
        match result {
            Ok(result) => writeln!(self.out, "Result: {result}")?,
            Err(e) => self.report_error("Calculation error", &e)?,
        }
        Ok(Flow::Continue)
    }

    // -- Shopping list -------------------------------------------------------

    fn list_menu(&mut self) -> io::Result<Flow> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "--- Shopping list ---")?;
            writeln!(self.out, "1. Add item")?;
            writeln!(self.out, "2. Remove item")?;
            writeln!(self.out, "3. Complete item")?;
            writeln!(self.out, "4. Show list")?;
            writeln!(self.out, "5. Show total")?;
            writeln!(self.out, "6. Back")?;

            let Some(choice) = self.prompt("Choose (1-6): ")? else {
                return Ok(Flow::Quit);
            };
            let flow = match choice.as_str() {
                "1" => self.add_item()?,
                "2" => self.pick_item("Item number to remove: ", Action::Remove)?,
                "3" => self.pick_item("Item number to complete: ", Action::Complete)?,
                "4" => {
                    self.show_list()?;
                    Flow::Continue
                }
                "5" => {
                    let total = self.app.list().calculate_total();
                    if total > 0.0 {
                        writeln!(self.out, "Total of priced items: ¥{total}")?;
                    } else {
                        writeln!(self.out, "No priced items")?;
                    }
                    Flow::Continue
                }
                "6" => return Ok(Flow::Continue),
                _ => {
                    writeln!(self.out, "Invalid choice. Enter a number from 1 to 6.")?;
                    Flow::Continue
                }
            };
            if let Flow::Quit = flow {
                return Ok(Flow::Quit);
            }
        }
    }

    fn add_item(&mut self) -> io::Result<Flow> {
        let Some(name) = self.prompt("Item name: ")? else {
            return Ok(Flow::Quit);
        };
        if name.is_empty() {
            writeln!(self.out, "Please enter an item name")?;
            return Ok(Flow::Continue);
        }
        let Some(quantity) = self.prompt("Quantity (default 1): ")? else {
            return Ok(Flow::Quit);
        };
        let Some(price) = self.prompt("Price (optional): ")? else {
            return Ok(Flow::Quit);
        };

        let quantity = if quantity.is_empty() {
            Ok(1)
        } else {
            quantity.parse::<u32>()
        };
        let price = if price.is_empty() {
            Ok(None)
        } else {
            price.parse::<f64>().map(Some)
        };
        let (Ok(quantity), Ok(price)) = (quantity, price) else {
            writeln!(self.out, "Invalid number")?;
            return Ok(Flow::Continue);
        };

        match self.app.list_mut().add_item(&name, quantity, price) {
            Ok(message) => writeln!(self.out, "{message}")?,
            Err(e) => self.report_error("Add failed", &e)?,
        }
        Ok(Flow::Continue)
    }

    fn pick_item(&mut self, msg: &str, action: Action) -> io::Result<Flow> {
        if self.app.list().is_empty() {
            writeln!(self.out, "The list has no pending items")?;
            return Ok(Flow::Continue);
        }
        self.show_list()?;
        let Some(number) = self.prompt(msg)? else {
            return Ok(Flow::Quit);
        };
        let Ok(number) = number.parse::<usize>() else {
            writeln!(self.out, "Invalid number")?;
            return Ok(Flow::Continue);
        };
        // Menu numbers are 1-based; 0 maps to an out-of-range index.
        let index = number.checked_sub(1).unwrap_or(usize::MAX);

        let list = self.app.list_mut();
        let result = match action {
            Action::Remove => list
                .remove_item(index)
                .map(|item| format!("Removed '{}' from the list", item.name)),
            Action::Complete => list
                .complete_item(index)
                .map(|item| format!("Completed '{}'", item.name)),
        };
        match result {
            Ok(message) => writeln!(self.out, "{message}")?,
            Err(e) => self.report_error(action.label(), &e)?,
        }
        Ok(Flow::Continue)
    }

    fn show_list(&mut self) -> io::Result<()> {
        let list = self.app.list();
        let (pending, completed) = (list.items(), list.completed_items());

        writeln!(self.out, "\n=== 買い物リスト ===")?;
        writeln!(self.out, "【未完了アイテム】")?;
        if pending.is_empty() {
            writeln!(self.out, "(なし)")?;
        }
        for (i, item) in pending.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, item_line(item))?;
        }
        if !completed.is_empty() {
            writeln!(self.out, "\n【完了済みアイテム】")?;
            for item in &completed {
                writeln!(self.out, "✓ {}", item_line(item))?;
            }
        }
        Ok(())
    }

    // -- Files ---------------------------------------------------------------

    fn save_list(&mut self) -> io::Result<Flow> {
        let Some(path) = self.prompt_path("Save to", ".json")? else {
            return Ok(Flow::Quit);
        };
        match self.app.list().save_to_file(&path) {
            Ok(()) => writeln!(self.out, "Saved list to '{}'", path.display())?,
            Err(e) => self.report_error("Save failed", &e)?,
        }
        Ok(Flow::Continue)
    }

    fn load_list(&mut self) -> io::Result<Flow> {
        let Some(path) = self.prompt_path("Load from", "")? else {
            return Ok(Flow::Quit);
        };
        match self.app.list_mut().load_from_file(&path) {
            Ok(()) => writeln!(self.out, "Loaded list from '{}'", path.display())?,
            Err(e) => self.report_error("Load failed", &e)?,
        }
        Ok(Flow::Continue)
    }

    fn export_list(&mut self) -> io::Result<Flow> {
        let Some(path) = self.prompt_path("Export to", ".txt")? else {
            return Ok(Flow::Quit);
        };
        match self.app.list().export_to_text(&path) {
            Ok(()) => writeln!(self.out, "Exported list to '{}'", path.display())?,
            Err(e) => self.report_error("Export failed", &e)?,
        }
        Ok(Flow::Continue)
    }

    /// Ask for a file name, defaulting to the configured data file and
    /// appending `extension` when it is missing.
    fn prompt_path(&mut self, verb: &str, extension: &str) -> io::Result<Option<PathBuf>> {
        let default = self.app.data_file().to_path_buf();
        let msg = format!("{verb} file (default {}): ", default.display());
        let Some(name) = self.prompt(&msg)? else {
            return Ok(None);
        };
        if name.is_empty() {
            return Ok(Some(default));
        }
        if !extension.is_empty() && !name.ends_with(extension) {
            return Ok(Some(PathBuf::from(format!("{name}{extension}"))));
        }
        Ok(Some(PathBuf::from(name)))
    }
}

#[derive(Clone, Copy)]
enum Action {
    Remove,
    Complete,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::Remove => "Remove failed",
            Action::Complete => "Complete failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(input: &str) -> (String, ShopCalc) {
        let app = ShopCalc::builder()
            .data_file("unused.json")
            .auto_save(false)
            .auto_load(false)
            .build();
        let mut out = Vec::new();
        let mut shell = Shell::new(app, input.as_bytes(), &mut out);
        shell.run().unwrap();
        let Shell { app, .. } = shell;
        (String::from_utf8(out).unwrap(), app)
    }

    #[test]
    fn farewell_is_flushed() {
        let mut out = io::BufWriter::new(Vec::new());
        farewell(&mut out).unwrap();
        assert_eq!(out.buffer(), b"");
        assert_eq!(out.get_ref().as_slice(), b"Goodbye!\n");
    }

    #[test]
    fn quit_prints_farewell_once() {
        let (out, _) = session("6\n");
        assert!(out.ends_with("Goodbye!\n"));
        assert_eq!(out.matches("Goodbye!").count(), 1);
    }

    #[test]
    fn end_of_input_exits_gracefully() {
        let (out, _) = session("");
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn adds_and_completes_items() {
        let input = "2\n1\nりんご\n3\n298\n1\n牛乳\n\n\n3\n1\n6\n6\n";
        let (out, app) = session(input);
        assert!(out.contains("Added 'りんご' to the list"));
        assert!(out.contains("Completed 'りんご'"));
        assert_eq!(app.list().items()[0].name, "牛乳");
        assert_eq!(app.list().completed_items()[0].name, "りんご");
    }

    #[test]
    fn invalid_item_number_is_reported() {
        let input = "2\n1\nパン\n\n\n2\n7\n6\n6\n";
        let (out, app) = session(input);
        assert!(out.contains("Remove failed: Invalid item number"));
        assert_eq!(app.list().len(), 1);
    }

    #[test]
    fn calculator_records_history() {
        let input = "1\n1\n2400\n÷\n8\n2\n298 * 1.08\n2\n1 / 0\n3\n5\n6\n";
        let (out, app) = session(input);
        assert!(out.contains("Result: 300"));
        assert!(out.contains("Calculation error: Invalid expression: division by zero"));
        assert_eq!(app.calculator().history().len(), 2);
        assert!(out.contains("1. 2400 ÷ 8 = 300"));
    }
}
