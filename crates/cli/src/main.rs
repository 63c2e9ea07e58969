use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::Parser;
use nagare_cli::{App, Command, Error, GenerateArgs, SolveArgs};
use nagare_core::board::{cnf, dot};
use nagare_core::solve;
use nagare_gen::{generate_many, GenParams};
use nagare_parser::parse_board;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let app = App::parse();
    let result = match &app.command {
        Command::Solve(args) => solve_board(args),
        Command::Generate(args) => generate(args),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn solve_board(args: &SolveArgs) -> Result<(), Error> {
    let text = fs::read_to_string(&args.file)?;
    let board = parse_board(&text)?;
    if args.print {
        println!("{board}");
    }

    let base = args.file.file_stem().map_or_else(
        || "board".to_owned(),
        |stem| stem.to_string_lossy().into_owned(),
    );
    let dir = args
        .file
        .parent()
        .map_or_else(PathBuf::new, Path::to_path_buf);

    // The edge list handed to the solver, one `v1 v2` per line.
    let mut listing = String::new();
    for &(a, b) in board.edges() {
        listing.push_str(&format!("{a} {b}\n"));
    }
    fs::write(dir.join(format!("{base}_graph.lst")), listing)?;

    let (zdd, graph) = solve(&board);
    println!("# board nodes : {}", graph.vertex_count());
    println!("# board edges : {}", graph.edge_count());
    println!("# zdd nodes   : {}", zdd.node_count());
    println!("# solutions   : {}", zdd.cardinality());

    if args.cnf {
        let mut out = fs::File::create(dir.join(format!("{base}.cnf")))?;
        cnf::write_csp(&board, &mut out)?;
    }

    if args.dump {
        let mut out = fs::File::create(dir.join(format!("{base}.dot")))?;
        dot::write_board_dot(&board, &mut out, None)?;

        let mut out = fs::File::create(dir.join(format!("{base}_zdd.dot")))?;
        nagare_zdd::write_dot(&zdd, &mut out)?;

        for (i, member) in zdd.members().enumerate() {
            let path = dir.join(format!("{base}_solution_{}.dot", i + 1));
            let mut out = fs::File::create(path)?;
            dot::write_board_dot(&board, &mut out, Some(member.as_slice()))?;
        }
    }

    Ok(())
}

fn generate(args: &GenerateArgs) -> Result<(), Error> {
    if args.width < 2 || args.height < 2 {
        return Err(Error::Usage(format!(
            "board must be at least 2x2, got {}x{}",
            args.width, args.height
        )));
    }
    if args.init > args.width * args.height {
        return Err(Error::Usage(format!(
            "--init {} exceeds the {}x{} board",
            args.init, args.width, args.height
        )));
    }

    fs::create_dir_all(&args.output_dir)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let params = GenParams::builder()
        .width(args.width)
        .height(args.height)
        .init_cells(args.init)
        .seed(seed)
        .build();

    let problems = generate_many(&params, args.count)?;

    for (i, problem) in problems.iter().enumerate() {
        fs::write(
            args.output_dir.join(format!("{i}.txt")),
            problem.board().to_pzprv3(),
        )?;
        let mut csp = fs::File::create(args.output_dir.join(format!("{i}.cnf")))?;
        cnf::write_csp(problem.board(), &mut csp)?;
        let record = fs::File::create(args.output_dir.join(format!("{i}.json")))?;
        serde_json::to_writer_pretty(record, problem)?;
    }

    let oracle_calls: u64 = problems.iter().map(nagare_gen::GeneratedProblem::count_calls).sum();
    println!(
        "Generated {} boards to {} (seed {seed}, {oracle_calls} oracle calls)",
        problems.len(),
        args.output_dir.display()
    );

    Ok(())
}
