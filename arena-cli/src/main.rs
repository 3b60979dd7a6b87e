use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use arena_client::arena_core::messages;
use arena_client::arena_core::models::{ActionKind, Challenge, Comment, TestReport, TopUser};
use arena_client::arena_core::{
    ChallengeList, CommentFeed, FetchTarget, FilterField, FilterSet, RegistrationForm, Workbench,
};
use arena_client::{ArenaClient, ArenaClientError, ClientConfig};
use clap::{Parser, Subcommand};
use tracing::debug;

mod logging;
mod session_file;
mod settings;

use logging::init_logging;
use session_file::FileTokenStore;
use settings::{Settings, normalize_server};

type Client = ArenaClient<FileTokenStore>;

#[derive(Debug, Parser)]
#[command(name = "arena-cli", version, about = "CLI клиент платформы задач")]
struct Cli {
    /// Адрес API (по умолчанию ARENA_API_URL или http://127.0.0.1:8000/beta).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Подробные логи запросов в stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация пользователя.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Вход пользователя.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Выход: удаляет сохранённые токены.
    Logout,
    /// Показывает, есть ли сохранённый вход.
    Status,
    /// Список задач с фильтрами или по URL из курсора.
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        favorites: bool,
        #[arg(long)]
        sort_by_likes: bool,
        /// URL страницы из вывода предыдущего `list`. Фильтры игнорируются.
        #[arg(long, conflicts_with_all = ["category", "difficulty", "language", "favorites", "sort_by_likes"])]
        page_url: Option<String>,
    },
    /// Значения для фильтров.
    Filters,
    /// Задача по id.
    Show {
        #[arg(long)]
        id: i64,
    },
    /// Лайк задачи.
    Like {
        #[arg(long)]
        id: i64,
    },
    /// Дизлайк задачи.
    Dislike {
        #[arg(long)]
        id: i64,
    },
    /// Добавить в избранное или убрать из него.
    Favorite {
        #[arg(long)]
        id: i64,
    },
    /// Запуск решения. Без `--file` запускается сохранённое решение.
    Run {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Прогон тестов задачи (только python и javascript).
    Test {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Сохранение решения из файла.
    Save {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        file: PathBuf,
    },
    /// Комментарии к задаче.
    Comments {
        #[arg(long)]
        id: i64,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Сколько следующих страниц подгрузить за раз.
        #[arg(long, default_value_t = 0)]
        more: u32,
    },
    /// Новый комментарий.
    Comment {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        content: String,
    },
    /// Таблица лидеров.
    Top,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;
    let cli = Cli::parse();
    init_logging(&settings.log_level, cli.verbose)?;

    let base_url = normalize_server(cli.server.unwrap_or_else(|| settings.api_url.clone()));
    let config = ClientConfig {
        base_url,
        connect_timeout: settings.connect_timeout,
        request_timeout: settings.request_timeout,
    };
    let store = FileTokenStore::new(&settings.session_file);
    let mut client = ArenaClient::new(config, store).context("no se pudo crear el cliente HTTP")?;

    match cli.command {
        Command::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let form = RegistrationForm {
                username,
                email,
                password,
                confirm_password,
            };
            client
                .register(&form)
                .await
                .map_err(|err| map_client_error(messages::REGISTRATION_FAILED, err))?;
            println!("Registro completado, sesión iniciada como {}", form.username);
        }
        Command::Login { username, password } => {
            client
                .login(&username, &password)
                .await
                .map_err(|err| map_client_error(messages::BAD_CREDENTIALS, err))?;
            println!("Sesión iniciada como {username}");
        }
        Command::Logout => {
            client.logout().context("no se pudo cerrar la sesión")?;
            println!("Sesión cerrada");
        }
        Command::Status => {
            if client.is_authenticated() {
                println!("Sesión activa");
            } else {
                println!("Sin sesión");
            }
        }
        Command::List {
            category,
            difficulty,
            language,
            favorites,
            sort_by_likes,
            page_url,
        } => {
            let target = match page_url {
                Some(url) => FetchTarget::Cursor(url),
                None => FetchTarget::Filtered(build_filters(
                    category,
                    difficulty,
                    language,
                    favorites,
                    sort_by_likes,
                )),
            };
            list_challenges(&client, target).await;
        }
        Command::Filters => {
            let options = client
                .filter_options()
                .await
                .map_err(|err| map_client_error(messages::FILTERS_LOAD_FAILED, err))?;
            println!("categorías: {}", options.categories.join(", "));
            println!("lenguajes: {}", options.languages.join(", "));
            println!("dificultades: {}", options.difficulties.join(", "));
        }
        Command::Show { id } => {
            let challenge = load_challenge(&client, id).await?;
            print_challenge(&challenge);
        }
        Command::Like { id } => challenge_action(&client, id, ActionKind::Like).await?,
        Command::Dislike { id } => challenge_action(&client, id, ActionKind::Dislike).await?,
        Command::Favorite { id } => challenge_action(&client, id, ActionKind::Favorite).await?,
        Command::Run { id, file } => {
            let mut bench = open_workbench(&client, id, file.as_ref()).await?;
            let Some(code) = bench.begin_compile() else {
                return Ok(());
            };
            let language = bench.run_language().to_string();
            let result = client.execute(&language, &code).await;
            if let Err(err) = &result {
                debug!(error = %err, "execution failed");
            }
            bench.finish_compile(result);
            println!("Salida:");
            println!("{}", bench.output());
        }
        Command::Test { id, file } => {
            let mut bench = open_workbench(&client, id, file.as_ref()).await?;
            if !bench.tests_available() {
                println!("{}", messages::TESTS_UNAVAILABLE);
                return Ok(());
            }
            let Some(solution) = bench.begin_test() else {
                return Ok(());
            };
            let result = client.run_tests(id, &solution).await;
            if let Err(err) = &result {
                debug!(error = %err, "test run failed");
            }
            bench.finish_test(result);
            if let Some(report) = bench.report() {
                print_report(report);
            }
        }
        Command::Save { id, file } => {
            let mut bench = open_workbench(&client, id, Some(&file)).await?;
            let Some(solution) = bench.begin_save() else {
                return Ok(());
            };
            let result = client.save_solution(id, &solution).await;
            if let Err(err) = &result {
                debug!(error = %err, "save failed");
            }
            bench.finish_save(result);
            if let Some(notice) = bench.take_notice() {
                println!("{notice}");
            }
        }
        Command::Comments { id, page, more } => {
            let mut feed = CommentFeed::new();
            let first = client
                .comments_page(id, page)
                .await
                .map_err(|err| map_client_error(messages::COMMENTS_LOAD_FAILED, err))?;
            feed.reset(first);

            for _ in 0..more {
                let Some(cursor) = feed.begin_load_more() else {
                    break;
                };
                match client.comments_at(&cursor).await {
                    Ok(next) => feed.finish_load_more(next),
                    Err(err) => {
                        debug!(error = %err, "loading more comments failed");
                        feed.fail_load_more();
                        break;
                    }
                }
            }
            print_comments(&feed);
        }
        Command::Comment { id, content } => {
            let comment = client
                .add_comment(id, &content)
                .await
                .map_err(|err| map_client_error(messages::COMMENT_FAILED, err))?;
            println!("{}", messages::COMMENT_ADDED);
            print_comment(&comment);
        }
        Command::Top => {
            let users = client
                .top_users()
                .await
                .map_err(|err| map_client_error(messages::LEADERBOARD_FAILED, err))?;
            print_top_users(&users);
        }
    }

    Ok(())
}

fn build_filters(
    category: Option<String>,
    difficulty: Option<String>,
    language: Option<String>,
    favorites: bool,
    sort_by_likes: bool,
) -> FilterSet {
    let mut filters = FilterSet::default();
    for (field, value) in [
        (FilterField::Category, category),
        (FilterField::Difficulty, difficulty),
        (FilterField::Language, language),
    ] {
        if let Some(value) = value {
            filters.set(field, value);
        }
    }
    filters.favorites = favorites;
    filters.sort_by_likes = sort_by_likes;
    filters
}

/// Сводит ошибку клиента к фиксированному сообщению.
///
/// Ошибки формы показываются как есть, остальное уходит в debug-лог.
fn map_client_error(message: &str, err: ArenaClientError) -> anyhow::Error {
    match err {
        ArenaClientError::Form(form) => anyhow::anyhow!(form.to_string()),
        other => {
            debug!(error = %other, "request failed");
            anyhow::anyhow!(message.to_string())
        }
    }
}

async fn list_challenges(client: &Client, target: FetchTarget) {
    let mut list = ChallengeList::new();
    let ticket = list.begin_fetch(&target);
    match client.list_challenges(&target).await {
        Ok(page) => {
            list.apply_page(ticket, page);
        }
        Err(err) => {
            debug!(error = %err, "challenge list failed");
            list.apply_error(ticket);
        }
    }
    print_list(&list);
}

async fn load_challenge(client: &Client, id: i64) -> Result<Challenge> {
    client
        .get_challenge(id)
        .await
        .map_err(|err| map_client_error(messages::CHALLENGE_LOAD_FAILED, err))
}

async fn challenge_action(client: &Client, id: i64, action: ActionKind) -> Result<()> {
    let snapshot = client
        .challenge_action(id, action)
        .await
        .map_err(|err| map_client_error(messages::ACTION_FAILED, err))?;
    println!(
        "[{id}] likes={} dislikes={} liked={} disliked={} favorito={}",
        snapshot.likes_count,
        snapshot.dislikes_count,
        snapshot.user_liked,
        snapshot.user_disliked,
        snapshot.user_favorited
    );
    Ok(())
}

async fn open_workbench(client: &Client, id: i64, file: Option<&PathBuf>) -> Result<Workbench> {
    let challenge = load_challenge(client, id).await?;
    let mut bench = Workbench::new(challenge);
    if let Some(path) = file {
        let code = fs::read_to_string(path)
            .with_context(|| format!("no se pudo leer {}", path.display()))?;
        bench.edit_solution(code);
    }
    Ok(bench)
}

fn print_list(list: &ChallengeList) {
    if let Some(error) = list.error() {
        println!("{error}");
        return;
    }

    println!("Desafíos: {}", list.items().len());
    for challenge in list.items() {
        let favorite = if challenge.user_favorited { " ★" } else { "" };
        println!(
            "- [{}] {} ({}, {}) 👍 {} 👎 {}{}",
            challenge.id,
            challenge.title,
            challenge.difficulty,
            challenge.language,
            challenge.likes_count,
            challenge.dislikes_count,
            favorite
        );
    }
    if let Some(previous) = &list.cursor().previous {
        println!("anterior: {previous}");
    }
    if let Some(next) = &list.cursor().next {
        println!("siguiente: {next}");
    }
}

fn print_challenge(challenge: &Challenge) {
    println!("{}", challenge.title);
    println!("id: {}", challenge.id);
    println!("descripción: {}", challenge.description);
    println!("dificultad: {}", challenge.difficulty);
    println!("lenguaje: {}", challenge.language);
    println!("categorías: {}", challenge.category_names());
    println!("likes: {}", challenge.likes_count);
    println!("dislikes: {}", challenge.dislikes_count);
    println!("favorito: {}", challenge.user_favorited);
    if let Some(solution) = &challenge.solution {
        println!("solución:");
        println!("{solution}");
    }
}

fn print_report(report: &TestReport) {
    println!("Resultado de los tests: {}", report.message);
    for case in &report.test_results {
        let mark = if case.passed() { "✅" } else { "❌" };
        println!("{}: {mark}", case.test_name);
        if !case.output.is_empty() {
            println!("{}", case.output);
        }
    }
    if let Some(points) = report.points_awarded {
        println!("puntos: {points}");
    }
}

fn print_comment(comment: &Comment) {
    println!("{} ({})", comment.user, comment.display_timestamp());
    println!("  {}", comment.content);
}

fn print_comments(feed: &CommentFeed) {
    if feed.is_exhausted_and_empty() {
        println!("{}", messages::NO_COMMENTS);
        return;
    }
    for comment in feed.comments() {
        print_comment(comment);
    }
    if let Some(next) = feed.next() {
        println!("siguiente: {next}");
    }
}

fn print_top_users(users: &[TopUser]) {
    println!("Top usuarios");
    for (position, user) in users.iter().enumerate() {
        println!("{}. {}: {} puntos", position + 1, user.username, user.points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_filters_sets_only_given_fields() {
        let filters = build_filters(None, Some("fácil".to_string()), None, true, false);
        assert_eq!(filters.difficulty, "fácil");
        assert_eq!(filters.category, "");
        assert!(filters.favorites);
        assert!(!filters.sort_by_likes);
    }

    #[test]
    fn map_client_error_hides_transport_details() {
        let err = map_client_error(messages::ACTION_FAILED, ArenaClientError::NotFound);
        assert_eq!(err.to_string(), messages::ACTION_FAILED);
    }

    #[test]
    fn map_client_error_keeps_form_messages() {
        let err = map_client_error(
            messages::REGISTRATION_FAILED,
            ArenaClientError::Form(arena_client::arena_core::FormError::PasswordMismatch),
        );
        assert_eq!(err.to_string(), "Las contraseñas no coinciden");
    }

    #[test]
    fn cli_parses_list_with_filters() {
        let cli = Cli::try_parse_from([
            "arena-cli",
            "list",
            "--language",
            "python",
            "--sort-by-likes",
        ])
        .expect("valid args");
        match cli.command {
            Command::List {
                language,
                sort_by_likes,
                page_url,
                ..
            } => {
                assert_eq!(language.as_deref(), Some("python"));
                assert!(sort_by_likes);
                assert!(page_url.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_page_url_with_filters() {
        let result = Cli::try_parse_from([
            "arena-cli",
            "list",
            "--language",
            "python",
            "--page-url",
            "http://127.0.0.1:8000/beta/challenges/challenges/?page=2",
        ]);
        assert!(result.is_err());
    }
}
