//! desk-runner: headless runner for the profitability desk.
//!
//! Usage:
//!   desk-runner --data-dir ./data --db catalog.db
//!   desk-runner --db catalog.db --ipc-mode

use anyhow::Result;
use profitdesk_core::{
    catalog::Catalog,
    config::DeskConfig,
    metrics::ProductInput,
    portfolio::{Payback, PortfolioKpis},
    product::Product,
    store::CatalogStore,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    AddProduct,
    UpdateProduct { id: String, input: ProductInput },
    RemoveProduct { id: String },
    DuplicateProduct { id: String },
    MoveProduct { id: String, position: usize },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    products:  Vec<Product>,
    portfolio: PortfolioKpis,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = arg_value(&args, "--db").unwrap_or(":memory:");
    let data_dir = arg_value(&args, "--data-dir").unwrap_or("./data");

    if !ipc_mode {
        println!("Profit Desk: desk-runner");
        println!("  db:        {db}");
        println!("  data_dir:  {data_dir}");
        println!();
    }

    let config = DeskConfig::load(data_dir)?;

    let store = CatalogStore::open(db)?;
    store.migrate()?;

    let mut catalog = store.load_catalog()?;
    if catalog.is_empty() {
        catalog = Catalog::from_products(config.seed_products.clone())?;
        store.save_catalog(&catalog)?;
        log::info!("seeded empty store with {} products", catalog.len());
    }

    if ipc_mode {
        run_ipc_loop(&config, &store, &mut catalog)?;
    } else {
        print_summary(&config, &catalog);
    }

    Ok(())
}

fn run_ipc_loop(config: &DeskConfig, store: &CatalogStore, catalog: &mut Catalog) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        match process_line(config, store, catalog, &buffer) {
            Some(reply) => writeln!(stdout, "{reply}")?,
            None => break,
        }
        stdout.flush()?;
    }
    Ok(())
}

/// Apply one IPC line and build the reply. `None` means quit.
///
/// A mutation that cannot be persisted is rolled back so the catalog in
/// memory always matches the store.
fn process_line(
    config: &DeskConfig,
    store: &CatalogStore,
    catalog: &mut Catalog,
    line: &str,
) -> Option<String> {
    let cmd: IpcCommand = match serde_json::from_str(line) {
        Ok(c) => c,
        Err(e) => return Some(error_reply(&e.to_string())),
    };

    if matches!(cmd, IpcCommand::Quit) {
        return None;
    }

    let mutates = !matches!(cmd, IpcCommand::GetState);
    let before = mutates.then(|| catalog.clone());

    if let Err(e) = handle_command(config, catalog, cmd) {
        log::warn!("ipc: command rejected: {e}");
        return Some(error_reply(&e.to_string()));
    }

    if let Some(before) = before {
        if let Err(e) = store.save_catalog(catalog) {
            log::warn!("ipc: save failed, rolling back: {e}");
            *catalog = before;
            return Some(error_reply(&format!("save failed: {e}")));
        }
    }

    let state = build_ui_state(config, catalog);
    Some(serde_json::to_string(&state).unwrap_or_else(|e| error_reply(&e.to_string())))
}

fn handle_command(config: &DeskConfig, catalog: &mut Catalog, cmd: IpcCommand) -> Result<()> {
    match cmd {
        IpcCommand::GetState | IpcCommand::Quit => {}
        IpcCommand::AddProduct => {
            catalog.add_product(config.default_fx_rate);
        }
        IpcCommand::UpdateProduct { id, input } => {
            catalog.replace_product(&id, input)?;
        }
        IpcCommand::RemoveProduct { id } => {
            catalog.remove_product(&id)?;
        }
        IpcCommand::DuplicateProduct { id } => {
            catalog.duplicate_product(&id)?;
        }
        IpcCommand::MoveProduct { id, position } => {
            catalog.move_product(&id, position)?;
        }
    }
    Ok(())
}

fn build_ui_state(config: &DeskConfig, catalog: &Catalog) -> UiState {
    let products = catalog.enriched(&config.fee_schedule);
    let portfolio = profitdesk_core::aggregate_portfolio(&products);
    UiState { products, portfolio }
}

fn error_reply(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

fn print_summary(config: &DeskConfig, catalog: &Catalog) {
    let state = build_ui_state(config, catalog);

    println!("=== PRODUCTS ===");
    if state.products.is_empty() {
        println!("  (Catalog is empty)");
    }
    for p in &state.products {
        let m = p.metrics();
        println!(
            "  {:<16} | Landed: ₹{:.2} | Net: ₹{:.2} ({:.1}%) | ROI: {:.1}% | Take-home: ₹{:.0}/mo",
            p.input().sku,
            m.landed_cogs,
            m.real_net_profit,
            m.real_net_profit_margin,
            m.roi,
            m.total_monthly_take_home
        );
    }

    let k = &state.portfolio;
    println!();
    println!("=== PORTFOLIO ===");
    println!("  investment:          ₹{:.0}", k.total_inventory_value);
    println!("  potential revenue:   ₹{:.0}", k.total_inventory_revenue);
    println!(
        "  gross profit:        ₹{:.0} ({:.1}%)",
        k.total_inventory_gross_profit, k.total_inventory_gross_margin
    );
    println!(
        "  net profit:          ₹{:.0} ({:.1}%)",
        k.total_inventory_net_profit, k.total_inventory_net_margin
    );
    println!("  monthly take-home:   ₹{:.0}", k.total_monthly_take_home);
    println!("  days of inventory:   {:.1}", k.days_of_inventory);
    println!("  contribution margin: {:.1}%", k.contribution_margin_percent);
    match k.months_to_payback {
        Payback::Months(m) => println!("  payback:             {m:.1} months"),
        Payback::NotApplicable => println!("  payback:             n/a"),
    }
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_store() -> CatalogStore {
        let store = CatalogStore::in_memory().unwrap();
        store.migrate().unwrap();
        store
    }

    #[test]
    fn add_product_is_persisted_and_reported() {
        let config = DeskConfig::default_test();
        let store = ready_store();
        let mut catalog = Catalog::new();

        let reply = process_line(&config, &store, &mut catalog, r#"{"type":"add_product"}"#)
            .expect("reply");

        let state: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(state["products"].as_array().unwrap().len(), 1);
        assert_eq!(store.product_count().unwrap(), 1);
    }

    #[test]
    fn failed_save_replies_error_and_rolls_back() {
        let config = DeskConfig::default_test();
        // No migration: every save fails.
        let store = CatalogStore::in_memory().unwrap();
        let mut catalog = Catalog::new();

        let reply = process_line(&config, &store, &mut catalog, r#"{"type":"add_product"}"#)
            .expect("loop keeps running");
        assert!(reply.contains("\"error\""), "unexpected reply: {reply}");
        assert!(catalog.is_empty());

        let reply = process_line(&config, &store, &mut catalog, r#"{"type":"get_state"}"#)
            .expect("loop keeps running");
        assert!(reply.contains("\"products\":[]"), "unexpected reply: {reply}");
    }

    #[test]
    fn rejected_and_malformed_commands_reply_error() {
        let config = DeskConfig::default_test();
        let store = ready_store();
        let mut catalog = Catalog::new();

        let reply = process_line(
            &config,
            &store,
            &mut catalog,
            r#"{"type":"remove_product","id":"missing"}"#,
        )
        .unwrap();
        assert!(reply.contains("\"error\""));

        let reply = process_line(&config, &store, &mut catalog, "{ nope").unwrap();
        assert!(reply.contains("\"error\""));
    }

    #[test]
    fn quit_ends_the_loop() {
        let config = DeskConfig::default_test();
        let store = ready_store();
        let mut catalog = Catalog::new();

        assert!(process_line(&config, &store, &mut catalog, r#"{"type":"quit"}"#).is_none());
    }
}
