//! Interactive menu for loading station data and producing statistics.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use weather_stats::analysis::{CorrelationKind, correlation_for_month};
use weather_stats::config::Config;
use weather_stats::ingest::load_from_source_list;
use weather_stats::logging::{self, Component};
use weather_stats::model::month_name;
use weather_stats::report::{AnnualReport, write_report, write_report_json};
use weather_stats::store::RecordCollection;

struct App {
    config: Config,
    collection: RecordCollection,
    loaded: bool,
}

impl App {
    fn new(config: Config) -> Self {
        Self {
            config,
            collection: RecordCollection::new(),
            loaded: false,
        }
    }

    fn run<R: BufRead>(&mut self, input: &mut R) -> io::Result<()> {
        loop {
            print_menu();
            let Some(choice) = prompt(input, "Enter your choice: ")? else {
                return Ok(());
            };
            match choice.as_str() {
                "1" => self.load(input)?,
                "2" if self.require_loaded() => self.display()?,
                "3" if self.require_loaded() => self.correlations(input)?,
                "4" if self.require_loaded() => self.annual_report(input)?,
                "5" if self.require_loaded() => self.structure_info(),
                "2" | "3" | "4" | "5" => {}
                "6" => return Ok(()),
                other => println!("Invalid choice '{}'. Please enter 1-6.", other),
            }
        }
    }

    fn require_loaded(&self) -> bool {
        if !self.loaded {
            println!("Please load the data first (Option 1).");
        }
        self.loaded
    }

    fn load<R: BufRead>(&mut self, input: &mut R) -> io::Result<()> {
        let default = self.config.ingest.source_list.display().to_string();
        let answer = prompt(input, &format!("Enter the data source file name [{}]: ", default))?;
        let list = match answer.filter(|a| !a.is_empty()) {
            Some(name) => PathBuf::from(name),
            None => self.config.ingest.source_list.clone(),
        };

        let ingest = &self.config.ingest;
        let summary = load_from_source_list(&list, &ingest.layout, ingest.skip_header, &mut self.collection);
        self.loaded |= summary.files_read > 0;

        println!(
            "Loaded {} lines from {} file(s); {} rejected, {} file(s) skipped.",
            summary.lines_accepted, summary.files_read, summary.lines_rejected, summary.files_skipped
        );
        if !self.loaded {
            println!("No data files could be read from {}.", list.display());
        }
        Ok(())
    }

    fn display(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.collection.display_all(&mut out)?;
        out.flush()
    }

    fn correlations<R: BufRead>(&self, input: &mut R) -> io::Result<()> {
        let Some(month) = prompt_number::<_, u32>(input, "Enter month (1-12): ")? else {
            return Ok(());
        };
        let Some(name) = month_name(month) else {
            println!("You have entered an invalid month. Please try again.");
            return Ok(());
        };

        println!("\nSample Pearson Correlation Coefficient for {}", name);
        for kind in CorrelationKind::ALL {
            println!("{}: {:.2}", kind, correlation_for_month(&self.collection, month, kind));
        }
        Ok(())
    }

    fn annual_report<R: BufRead>(&self, input: &mut R) -> io::Result<()> {
        let Some(year) = prompt_number::<_, i32>(input, "Enter year: ")? else {
            return Ok(());
        };

        let report = AnnualReport::for_year(&self.collection, year);
        print!("{}", report);
        if report.months_with_data() == 0 {
            println!("No data for {}.", year);
        }

        let output = &self.config.report.output;
        match write_report(&report, output) {
            Ok(()) => println!("Report written to {}", output.display()),
            Err(e) => logging::error(
                Component::Report,
                Some(&output.display().to_string()),
                &format!("Failed to write report: {}", e),
            ),
        }
        if let Some(json_path) = &self.config.report.json_output {
            if let Err(e) = write_report_json(&report, json_path) {
                logging::error(
                    Component::Report,
                    Some(&json_path.display().to_string()),
                    &format!("Failed to write JSON report: {}", e),
                );
            }
        }
        Ok(())
    }

    fn structure_info(&self) {
        let tree = self.collection.tree();
        println!("=== Data Structure Information ===");
        println!("Distinct dates (tree size): {}", tree.size());
        println!("Indexed records:            {}", self.collection.indexed_count());
        println!("Tree height:                {}", tree.height());
        println!("BST invariant holds:        {}", tree.check_invariant());
        let years: Vec<String> = self.collection.years().iter().map(i32::to_string).collect();
        println!("Years present:              {}", years.join(", "));
    }
}

fn print_menu() {
    println!("\n=== Weather Data Analysis ===");
    println!("1. Load Weather Data Files");
    println!("2. Display All Data");
    println!("3. Calculate Pearson Correlation Coefficients");
    println!("4. Generate Monthly Statistics Report");
    println!("5. Display Data Structure Information");
    println!("6. Exit");
    println!("=============================");
}

/// Prints `message` and reads one trimmed line. `None` at end of input.
fn prompt<R: BufRead>(input: &mut R, message: &str) -> io::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn prompt_number<R: BufRead, N: std::str::FromStr>(input: &mut R, message: &str) -> io::Result<Option<N>> {
    let Some(answer) = prompt(input, message)? else {
        return Ok(None);
    };
    match answer.parse() {
        Ok(n) => Ok(Some(n)),
        Err(_) => {
            println!("'{}' is not a valid number.", answer);
            Ok(None)
        }
    }
}

fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Falling back to default configuration.");
            Config::default()
        }
    };
    config.logging.init();
    logging::debug(Component::System, None, "Starting weather statistics menu");

    let mut app = App::new(config);
    let stdin = io::stdin();
    if let Err(e) = app.run(&mut stdin.lock()) {
        logging::error(Component::System, None, &format!("Terminal I/O failed: {}", e));
        std::process::exit(1);
    }
}
