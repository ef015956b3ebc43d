//! Binary entry point for the demonstration query harness: loads a graph
//! from a JSON fixture, runs a search specification through the pipeline,
//! and prints the resulting response.
//!
//! A `clap` derive tree with a global output-format flag and an `emit`
//! helper that either pretty-prints JSON or renders a short text summary.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use causal_path_search::external::{NullIdentifierUrlService, NullMeshRefCountService, NullOntologyService};
use causal_path_search::graph::GraphStore;
use causal_path_search::model::{Response, SubgraphResults};
use causal_path_search::spec::{SubgraphNodeRef, SubgraphRequest};
use causal_path_search::{Config, ResponseAssembler, SearchSpec};

#[derive(Parser, Debug)]
#[command(
    name = "query",
    version,
    about = "Runs a search specification through the causal path search pipeline",
    disable_help_subcommand = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        value_enum,
        default_value_t = OutputFormat::Json,
        help = "Output format for the response"
    )]
    output: OutputFormat,

    #[arg(
        long,
        global = true,
        default_value = "warn",
        help = "tracing filter, e.g. 'info' or 'causal_path_search=debug'"
    )]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(about = "Run a source/target/open search")]
    Search(SearchCmd),

    #[command(about = "Run an induced-subgraph query over a fixed node list")]
    Subgraph(SubgraphCmd),
}

#[derive(Args, Debug)]
struct SearchCmd {
    #[arg(long, value_name = "FILE", help = "Graph fixture (JSON)")]
    graph: PathBuf,

    #[arg(
        long,
        value_name = "FILE",
        help = "Full SearchSpec as JSON, overrides every inline flag below"
    )]
    spec: Option<PathBuf>,

    #[command(flatten)]
    inline: InlineSpecArgs,
}

#[derive(Args, Debug)]
struct InlineSpecArgs {
    #[arg(long, help = "Source node name")]
    source: Option<String>,

    #[arg(long, help = "Target node name")]
    target: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Lowercased statement-type allowlist")]
    stmt_filter: Vec<String>,

    #[arg(long, value_delimiter = ',', help = "Statement hashes to exclude")]
    edge_hash_blacklist: Vec<i64>,

    #[arg(long, value_delimiter = ',', help = "Namespace allowlist for interior nodes")]
    allowed_ns: Vec<String>,

    #[arg(long, value_delimiter = ',', help = "Node names to exclude entirely")]
    node_blacklist: Vec<String>,

    #[arg(long, help = "Exact path length in edges (closed search only)")]
    path_length: Option<u32>,

    #[arg(long, default_value_t = 2, help = "Max edge depth for open searches")]
    depth_limit: u32,

    #[arg(long, value_enum, help = "Requested net-effect sign on a closed search")]
    sign: Option<SignArg>,

    #[arg(long, help = "Use belief-derived edge weights instead of hop count")]
    weighted: bool,

    #[arg(long, help = "Drop statements below this belief score")]
    belief_cutoff: Option<f64>,

    #[arg(long, help = "Keep only curated-database statements")]
    curated_db_only: bool,

    #[arg(long, default_value_t = 50, help = "Result cap per path family")]
    k_shortest: usize,

    #[arg(long, help = "Per-node path-count cap (BFS/Dijkstra only)")]
    max_per_node: Option<u32>,

    #[arg(long, help = "Prune the best-connected interior node if >= this many candidates remain")]
    cull_best_node: Option<u32>,

    #[arg(long, value_delimiter = ',', help = "Mesh ids used for context weighting")]
    mesh_ids: Vec<String>,

    #[arg(long, help = "Restrict to exactly the given mesh ids rather than re-weighting")]
    strict_mesh_id_filtering: bool,

    #[arg(long, help = "Per-query wall-clock budget in seconds")]
    user_timeout: Option<f64>,

    #[arg(long, help = "Also run the reverse (target-to-source) search")]
    two_way: bool,

    #[arg(long, help = "Run shared-regulators instead of shared-targets as the auxiliary")]
    shared_regulators: bool,

    #[arg(long, value_delimiter = ',', help = "Namespaces an open search may terminate on")]
    terminal_ns: Vec<String>,
}

#[derive(Args, Debug)]
struct SubgraphCmd {
    #[arg(long, value_name = "FILE", help = "Graph fixture (JSON)")]
    graph: PathBuf,

    #[arg(
        long = "node",
        value_name = "NAME:NAMESPACE:IDENTIFIER",
        action = clap::ArgAction::Append,
        required = true,
        help = "Requested node, repeatable"
    )]
    nodes: Vec<String>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum SignArg {
    #[value(name = "+")]
    Plus,
    #[value(name = "-")]
    Minus,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _ = causal_path_search::logging::init(&cli.log_level);

    match &cli.command {
        Command::Search(cmd) => run_search(cmd, cli.output),
        Command::Subgraph(cmd) => run_subgraph(cmd, cli.output),
    }
}

fn run_search(cmd: &SearchCmd, output: OutputFormat) -> Result<(), Box<dyn Error>> {
    let store = load_graph(&cmd.graph)?;
    let spec = load_spec(cmd)?;

    let config = Config::default();
    let ontology = NullOntologyService;
    let url_service = NullIdentifierUrlService;
    let mesh = NullMeshRefCountService;
    let assembler = ResponseAssembler::new(&store, &ontology, &url_service, &mesh, &config);
    let response = assembler.assemble(&spec)?;

    emit_response(output, &response)
}

fn run_subgraph(cmd: &SubgraphCmd, output: OutputFormat) -> Result<(), Box<dyn Error>> {
    let store = load_graph(&cmd.graph)?;
    let refs = cmd
        .nodes
        .iter()
        .map(|raw| parse_node_ref(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let config = Config::default();
    let request = SubgraphRequest::new(refs, &config)?;

    let ontology = NullOntologyService;
    let url_service = NullIdentifierUrlService;
    let mesh = NullMeshRefCountService;
    let assembler = ResponseAssembler::new(&store, &ontology, &url_service, &mesh, &config);
    let results = assembler.assemble_subgraph(&request);

    emit_subgraph(output, &results)
}

fn load_graph(path: &PathBuf) -> Result<GraphStore, Box<dyn Error>> {
    let raw = fs::read_to_string(path)?;
    Ok(GraphStore::from_fixture_json(&raw)?)
}

fn load_spec(cmd: &SearchCmd) -> Result<SearchSpec, Box<dyn Error>> {
    if let Some(path) = &cmd.spec {
        let raw = fs::read_to_string(path)?;
        return Ok(SearchSpec::from_json(&raw)?);
    }
    let json = inline_spec_json(&cmd.inline);
    Ok(SearchSpec::from_json(&serde_json::to_string(&json)?)?)
}

fn inline_spec_json(args: &InlineSpecArgs) -> serde_json::Value {
    serde_json::json!({
        "source": args.source,
        "target": args.target,
        "stmt_filter": args.stmt_filter,
        "edge_hash_blacklist": args.edge_hash_blacklist,
        "allowed_ns": args.allowed_ns,
        "node_blacklist": args.node_blacklist,
        "path_length": args.path_length,
        "depth_limit": args.depth_limit,
        "sign": args.sign.map(|s| match s {
            SignArg::Plus => "+",
            SignArg::Minus => "-",
        }),
        "weighted": args.weighted,
        "belief_cutoff": args.belief_cutoff,
        "curated_db_only": args.curated_db_only,
        "k_shortest": args.k_shortest,
        "max_per_node": args.max_per_node,
        "cull_best_node": args.cull_best_node,
        "mesh_ids": args.mesh_ids,
        "strict_mesh_id_filtering": args.strict_mesh_id_filtering,
        "const_c": 1,
        "const_tk": 10,
        "user_timeout": args.user_timeout,
        "two_way": args.two_way,
        "shared_regulators": args.shared_regulators,
        "terminal_ns": args.terminal_ns,
        "format": serde_json::Value::Null,
    })
}

fn parse_node_ref(raw: &str) -> Result<SubgraphNodeRef, Box<dyn Error>> {
    let mut parts = raw.splitn(3, ':');
    let name = parts.next().unwrap_or_default().to_string();
    let namespace = parts.next().unwrap_or_default().to_string();
    let identifier = parts.next().unwrap_or_default().to_string();
    if name.is_empty() {
        return Err(format!("invalid --node '{raw}', expected NAME:NAMESPACE:IDENTIFIER").into());
    }
    Ok(SubgraphNodeRef { name, namespace, identifier })
}

fn emit_response(output: OutputFormat, response: &Response) -> Result<(), Box<dyn Error>> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(response)?),
        OutputFormat::Text => print_response_text(response),
    }
    Ok(())
}

fn emit_subgraph(output: OutputFormat, results: &SubgraphResults) -> Result<(), Box<dyn Error>> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(results)?),
        OutputFormat::Text => print_subgraph_text(results),
    }
    Ok(())
}

fn print_response_text(response: &Response) {
    println!("query_hash={} time_limit={:.1}s timed_out={}", response.query_hash, response.time_limit, response.timed_out);
    if let Some(forward) = &response.forward {
        println!("forward: {} path(s)", forward.total_paths());
    }
    if let Some(reverse) = &response.reverse {
        println!("reverse: {} path(s)", reverse.total_paths());
    }
    if let Some(ontology) = &response.ontology {
        println!("ontology: {} shared parent(s)", ontology.parents.len());
    }
    if let Some(shared) = &response.shared_targets {
        println!("shared_targets: {} pair(s)", shared.source_data.len());
    }
    if let Some(shared) = &response.shared_regulators {
        println!("shared_regulators: {} pair(s)", shared.source_data.len());
    }
}

fn print_subgraph_text(results: &SubgraphResults) {
    println!(
        "requested={} resolved={} not_in_graph={} edges={}",
        results.requested.len(),
        results.resolved.len(),
        results.not_in_graph.len(),
        results.edges.len()
    );
    for name in &results.not_in_graph {
        println!("  not in graph: {name}");
    }
}
