use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use mockcluster::{Cluster, ClusterOptions, NewBucketOptions, NewNodeOptions};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "cluster-tool")]
#[command(about = "Stand up a mock cluster and inspect its topology")]
struct Cli {
    /// JSON file with cluster options; flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,
    #[arg(long)]
    vbuckets: Option<u32>,
    #[arg(long)]
    replica_latency_ms: Option<u64>,
    #[arg(long)]
    feature: Vec<String>,
    /// Total number of nodes, including the initial one.
    #[arg(long, default_value_t = 1)]
    nodes: usize,
    #[arg(long)]
    bucket: Vec<String>,
    #[arg(long, default_value_t = 1)]
    replicas: u32,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the cluster config blob.
    Config {
        #[arg(long)]
        pretty: bool,
    },
    /// Print the vbucket map of one bucket.
    VbMap {
        #[arg(long)]
        bucket: String,
    },
    /// Print per-node primary and replica vbucket counts.
    Balance {
        #[arg(long)]
        bucket: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cluster = build_cluster(&cli)?;

    match &cli.command {
        Command::Config { pretty } => print_config(&cluster, *pretty),
        Command::VbMap { bucket } => print_vb_map(&cluster, bucket),
        Command::Balance { bucket } => print_balance(&cluster, bucket),
    }
}

fn build_cluster(cli: &Cli) -> Result<Cluster> {
    let mut options = match &cli.options {
        Some(path) => ClusterOptions::from_json_file(path)
            .with_context(|| format!("Failed to load cluster options from '{}'", path.display()))?,
        None => ClusterOptions::new(),
    };
    if let Some(vbuckets) = cli.vbuckets {
        options = options.num_vbuckets(vbuckets);
    }
    if let Some(latency) = cli.replica_latency_ms {
        options = options.replica_latency(Duration::from_millis(latency));
    }
    for feature in &cli.feature {
        options = options.feature(feature.as_str());
    }

    let cluster = Cluster::new(options).context("Failed to create cluster")?;
    for _ in 1..cli.nodes {
        cluster
            .add_node(NewNodeOptions::new())
            .context("Failed to add node")?;
    }
    for name in &cli.bucket {
        cluster
            .add_bucket(NewBucketOptions::new(name.as_str()).num_replicas(cli.replicas))
            .with_context(|| format!("Failed to create bucket '{}'", name))?;
    }
    Ok(cluster)
}

fn print_config(cluster: &Cluster, pretty: bool) -> Result<()> {
    let blob = cluster.config()?;
    if pretty {
        let value: serde_json::Value = serde_json::from_slice(&blob)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", String::from_utf8_lossy(&blob));
    }
    Ok(())
}

fn print_vb_map(cluster: &Cluster, name: &str) -> Result<()> {
    let bucket = cluster
        .get_bucket(name)
        .ok_or_else(|| anyhow!("Bucket '{}' not found", name))?;
    for (vb, entry) in bucket.vb_map().entries().iter().enumerate() {
        println!("{:>5}  {}  [{}]", vb, entry.primary, entry.replicas.join(", "));
    }
    Ok(())
}

fn print_balance(cluster: &Cluster, name: &str) -> Result<()> {
    let bucket = cluster
        .get_bucket(name)
        .ok_or_else(|| anyhow!("Bucket '{}' not found", name))?;
    let map = bucket.vb_map();
    for node_id in cluster.node_ids() {
        println!(
            "{}  primaries={}  replicas={}",
            node_id,
            map.partitions_owned_by(&node_id).len(),
            map.replica_partitions_of(&node_id).len()
        );
    }
    Ok(())
}
