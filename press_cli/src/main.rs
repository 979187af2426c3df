//! # PressPlan CLI Application
//!
//! Terminal front-end for the press-room calculators. Prompts for job
//! parameters on stdin and prints a formatted report.
//!
//! The heavy lifting lives in `press_core`; this binary only collects
//! inputs and renders results.

use std::io::{self, BufRead, Write};

use press_core::calculations::corona::{self, CoronaInput, SurfaceCondition};
use press_core::calculations::flowpack::{self, FlowpackDesign};
use press_core::calculations::jar::{self, JarProductType};
use press_core::calculations::label::{self, LabelDesign};
use press_core::calculations::roll_length::{self, RollLengthInput};
use press_core::calculations::uv_energy::{self, UvEnergyInput};
use press_core::materials::{Coating, Substrate};
use press_core::products::ProductStore;

/// Read one trimmed line from stdin; `None` on EOF or read error.
fn read_input_line() -> Option<String> {
    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    match read_input_line() {
        Some(line) => line.parse().unwrap_or(default),
        None => default,
    }
}

fn prompt_choice(prompt: &str, max: usize) -> usize {
    loop {
        print!("{}", prompt);
        if io::stdout().flush().is_err() {
            return max;
        }

        // EOF falls through to the last menu entry so piped input exits
        // cleanly instead of re-prompting forever.
        let Some(line) = read_input_line() else {
            return max;
        };
        if let Ok(choice) = line.parse::<usize>() {
            if (1..=max).contains(&choice) {
                return choice;
            }
        }
        println!("Enter a number between 1 and {}.", max);
    }
}

fn pick_substrate() -> Substrate {
    println!("Substrate:");
    for (i, substrate) in Substrate::ALL.iter().enumerate() {
        println!("  {:2}. {}", i + 1, substrate);
    }
    let choice = prompt_choice("Choose substrate: ", Substrate::ALL.len());
    Substrate::ALL[choice - 1]
}

fn pick_coating() -> Coating {
    println!("Coating:");
    for (i, coating) in Coating::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, coating);
    }
    let choice = prompt_choice("Choose coating: ", Coating::ALL.len());
    Coating::ALL[choice - 1]
}

fn run_roll_length() {
    println!();
    println!("Roll length from geometry");
    println!("-------------------------");
    let input = RollLengthInput {
        thickness_mm: prompt_f64("Material thickness (mm) [0.110]: ", 0.110),
        core_outer_cm: prompt_f64("Core outer diameter (cm) [9.7]: ", 9.7),
        core_wall_cm: prompt_f64("Core wall thickness (cm) [1.0]: ", 1.0),
        roll_outer_cm: Some(prompt_f64("Roll outer diameter (cm) [30.0]: ", 30.0)),
        core_is_inner: false,
    };

    match roll_length::calculate(&input) {
        Ok(result) => {
            println!();
            println!("  Spooled length:  {} m", result.length_m);
            println!("  Inner diameter:  {} cm", result.inner_diameter_cm);
        }
        Err(err) => println!("  Error: {}", err),
    }
}

fn run_uv_energy() {
    println!();
    println!("DC330 UV energy");
    println!("---------------");
    let substrate = pick_substrate();
    let coating = pick_coating();
    let speed_mpm = prompt_f64("Web speed (m/min) [20.0]: ", 20.0);

    let result = uv_energy::calculate(&UvEnergyInput {
        speed_mpm,
        substrate,
        coating,
    });

    println!();
    match result.target_uv_display {
        Some(target) => println!("  Target UV:     {:.0} W (raw {:.0})", target, result.target_uv_raw),
        None => println!("  Target UV:     —"),
    }
    println!("  Min UV:        {:.0} W", result.recommended_min_uv);
    println!("  Gradient:      {:.0}", result.recommended_gradient);
    println!("  Predicted UV:  {:.0} W", result.predicted_uv);
    println!("  Heat-limited:  {}", if result.heat_limited { "yes" } else { "no" });
    if let Some(max_speed) = result.recommended_max_speed {
        println!("  Max speed:     {} m/min", max_speed);
    }
    for warning in &result.warnings {
        println!("  ! {}", warning);
    }
}

fn run_corona() {
    println!();
    println!("Corona treatment advice");
    println!("-----------------------");
    let substrate = pick_substrate();
    let coating = pick_coating();

    let advice = corona::advise(&CoronaInput {
        substrate,
        coating,
        surface_condition: Some(SurfaceCondition::AgedUnknown),
    });

    println!();
    println!("  Target dyne:   {}", advice.target_dyne);
    println!(
        "  Corona:        {} ({:?} confidence)",
        if advice.corona_recommended { "recommended" } else { "likely not needed" },
        advice.confidence
    );
    for note in &advice.notes {
        println!("  - {}", note);
    }
    for warning in &advice.warnings {
        println!("  ! {}", warning);
    }
}

fn run_candy_jars() {
    println!();
    println!("Candy jar planning");
    println!("------------------");
    println!("  1. Midi jars");
    println!("  2. Maxi jars");
    let product_type = if prompt_choice("Choose product type: ", 2) == 1 {
        JarProductType::Midi
    } else {
        JarProductType::Maxi
    };
    let jars = prompt_f64("Jars to produce [96]: ", 96.0);

    match jar::plan(product_type, jars) {
        Some(plan) => {
            println!();
            println!("  Approx. weight:      {:.1} kg", plan.kg);
            println!("  Total clicks:        {}", plan.clicks);
            println!("  Approx. diecut stop: {} m", plan.meters);
        }
        None => println!("  Enter a positive jar count to see the calculation."),
    }
}

fn run_label_job(store: &ProductStore) {
    println!();
    println!("Label job planning");
    println!("------------------");
    println!("Product:");
    for (i, product) in store.products().iter().enumerate() {
        println!(
            "  {}. {} (max {} lanes, {} labels/click)",
            i + 1,
            product.label,
            product.max_lanes,
            product.labels_per_click
        );
    }
    let choice = prompt_choice("Choose product: ", store.products().len());
    let product = &store.products()[choice - 1];

    let design_count = prompt_f64("Number of designs [1]: ", 1.0) as usize;
    let mut designs = Vec::new();
    for i in 1..=design_count.max(1) {
        println!("Design {}:", i);
        designs.push(LabelDesign {
            name: format!("Design {}", i),
            total_labels: prompt_f64("  Total labels [0]: ", 0.0),
            lanes: prompt_f64("  Lanes [0]: ", 0.0),
        });
    }

    match label::plan(product, &designs) {
        Some(plan) => {
            println!();
            if plan.lanes_clamped {
                println!("  Note: total lanes limited to max {} for this product.", product.max_lanes);
            }
            println!("  Total clicks to print: {}", plan.total_clicks);
            println!();
            println!("  {:<6} {:<12} {:>10} {:>14} {:>10} {:>10}", "Lane", "Design", "Needed", "Labels/click", "Produced", "Waste");
            for row in &plan.rows {
                println!(
                    "  {:<6} {:<12} {:>10} {:>14.2} {:>10} {:>10}",
                    row.lane, row.design_name, row.required, row.labels_per_click, row.produced, row.waste
                );
            }
        }
        None => println!("  Enter total labels and lanes for at least one design."),
    }
}

fn run_flowpack_job() {
    println!();
    println!("Flowpack job planning (3 lanes total)");
    println!("-------------------------------------");
    let design_count = prompt_f64("Number of designs [1]: ", 1.0) as usize;
    let mut designs = Vec::new();
    for i in 1..=design_count.max(1) {
        println!("Design {}:", i);
        designs.push(FlowpackDesign {
            name: format!("Design {}", i),
            kg: prompt_f64("  Kilos of candy [0]: ", 0.0),
            lanes: prompt_f64("  Lanes [0]: ", 0.0),
        });
    }

    match flowpack::plan(&designs) {
        Some(plan) => {
            println!();
            println!("  Mode:         {:?}", plan.mode);
            println!("  Table kg:     {:.2}", plan.kg_for_table);
            println!("  Total clicks: {}", plan.clicks);
            println!("  Diecut stop:  {} m", plan.meters);
        }
        None => println!("  Enter kilos and lanes for at least one design."),
    }
}

fn main() {
    println!("PressPlan CLI - Press-Room Production Calculators");
    println!("=================================================");

    let store = ProductStore::with_builtins();

    loop {
        println!();
        println!("  1. Label job planning");
        println!("  2. Flowpack job planning");
        println!("  3. Candy jar planning");
        println!("  4. Roll length from geometry");
        println!("  5. DC330 UV energy");
        println!("  6. Corona treatment advice");
        println!("  7. Quit");
        match prompt_choice("Choose calculator: ", 7) {
            1 => run_label_job(&store),
            2 => run_flowpack_job(),
            3 => run_candy_jars(),
            4 => run_roll_length(),
            5 => run_uv_energy(),
            6 => run_corona(),
            _ => break,
        }
    }
}
