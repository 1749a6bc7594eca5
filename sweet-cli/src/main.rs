use clap::Parser;
use sweet_client::SweetClient;
use uuid::Uuid;

#[derive(Parser, Debug)]
struct Cli {
    #[clap(short, long)]
    server: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    Register {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
        #[clap(long)]
        role: Option<String>,
    },
    Login {
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
    },
    List,
    Search {
        #[clap(long)]
        query: String,
    },
    Add {
        #[clap(long)]
        name: String,
        #[clap(long)]
        category: String,
        #[clap(long)]
        price: f64,
        #[clap(long)]
        quantity: Option<i32>,
    },
    Update {
        id: Uuid,
        #[clap(long)]
        name: Option<String>,
        #[clap(long)]
        category: Option<String>,
        #[clap(long)]
        price: Option<f64>,
        #[clap(long)]
        quantity: Option<i32>,
    },
    Delete {
        id: Uuid,
    },
    Purchase {
        id: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let endpoint = args.server.as_deref().unwrap_or("http://127.0.0.1:8080");
    let mut client = SweetClient::connect(endpoint)?;

    match args.command {
        Command::Register {
            email,
            password,
            role,
        } => {
            let auth = client
                .register(&email, &password, role.as_deref())
                .await?;
            println!("Registered {} as {}", auth.user.email, auth.user.role);
        }
        Command::Login { email, password } => {
            let auth = client.login(&email, &password).await?;
            println!("Logged in as {}", auth.user.email);
        }
        Command::List => {
            let sweets = client.list_sweets().await?;
            println!("Sweets ({})", sweets.len());
            for sweet in sweets {
                println!("- {}", sweet);
            }
        }
        Command::Search { query } => {
            let sweets = client.search_sweets(&query).await?;
            for sweet in sweets {
                println!("{}", sweet);
            }
        }
        Command::Add {
            name,
            category,
            price,
            quantity,
        } => {
            let sweet = client
                .create_sweet(&name, &category, price, quantity)
                .await?;
            println!("Sweet created! ID: {}", sweet.id);
        }
        Command::Update {
            id,
            name,
            category,
            price,
            quantity,
        } => {
            let sweet = client
                .update_sweet(id, name.as_deref(), category.as_deref(), price, quantity)
                .await?;
            println!("Sweet updated: {}", sweet);
        }
        Command::Delete { id } => {
            let message = client.delete_sweet(id).await?;
            println!("{}", message);
        }
        Command::Purchase { id } => {
            let receipt = client.purchase_sweet(id).await?;
            println!(
                "{} ({} left)",
                receipt.message, receipt.remaining_quantity
            );
        }
    }

    Ok(())
}
