use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use mocode::app::Session;
use mocode::kernel::services::adapters::{
    ensure_preview_dir, ensure_settings_file, ensure_store_dir, load_settings, DirBlobRegistry,
    FileStore, RecordingSurface,
};
use mocode::kernel::services::ports::{surface_channel, Settings};
use mocode::kernel::{Language, PreviewSandbox, ProjectId};

mod logging;

const USAGE: &str = "usage: mocode <command>

commands:
  list                      list projects (* marks the selected one)
  new <name>                create a project
  rename <id> <name>        rename a project
  copy <id>                 duplicate a project
  delete <id>               delete a project
  select <id>               select a project
  set-html <file>           replace the selected project's HTML
  set-css <file>            replace the selected project's CSS
  set-js <file>             replace the selected project's JS
  show <html|css|js>        print the selected project's source
  render                    write the selected project's preview and print its url
  log                       print the selected project's console
  export <id> <zip>         export a project archive
  import <zip>              import a project archive";

type CliSession = Session<DirBlobRegistry, RecordingSurface>;

fn main() -> ExitCode {
    if let Err(e) = ensure_settings_file() {
        eprintln!("mocode: cannot create settings file: {}", e);
    }
    let settings = load_settings().unwrap_or_default();
    let _logging = logging::init(settings.log_filter.as_deref());

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args[0] == "-h" || args[0] == "--help" {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    match run(&settings, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            tracing::error!(error = %msg, command = %args[0], "command failed");
            eprintln!("mocode: {}", msg);
            ExitCode::FAILURE
        }
    }
}

fn open_session(settings: &Settings) -> Result<CliSession, String> {
    let store_dir = match &settings.store_dir {
        Some(dir) => dir.clone(),
        None => ensure_store_dir().map_err(|e| e.to_string())?,
    };
    let preview_dir = match &settings.preview_dir {
        Some(dir) => dir.clone(),
        None => ensure_preview_dir().map_err(|e| e.to_string())?,
    };

    let registry = DirBlobRegistry::new(preview_dir);
    registry.sweep().map_err(|e| e.to_string())?;

    let (sender, receiver) = surface_channel();
    let sandbox = PreviewSandbox::new(Arc::new(registry), RecordingSurface::new(sender));
    Session::open(
        Arc::new(FileStore::new(store_dir)),
        sandbox,
        receiver,
        &settings.default_project_name,
    )
    .map_err(|e| e.to_string())
}

fn arg_at(args: &[String], index: usize) -> Result<&str, String> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("missing argument\n\n{}", USAGE))
}

fn language_arg(name: &str) -> Result<Language, String> {
    match name {
        "html" => Ok(Language::Html),
        "css" => Ok(Language::Css),
        "js" => Ok(Language::JavaScript),
        other => Err(format!("unknown language '{}'\n\n{}", other, USAGE)),
    }
}

fn run(settings: &Settings, args: &[String]) -> Result<(), String> {
    let mut session = open_session(settings)?;
    let arg = |index: usize| arg_at(args, index);

    match args[0].as_str() {
        "list" => {
            let state = session.state();
            for project in &state.projects {
                let marker = if state.current_project_id.as_ref() == Some(&project.id) {
                    '*'
                } else {
                    ' '
                };
                println!("{} {}  {}", marker, project.id, project.name);
            }
        }
        "new" => {
            let id = session.create_project(arg(1)?);
            println!("{}", id);
        }
        "rename" => {
            let id = ProjectId::from(arg(1)?);
            if !session.rename_project(id.clone(), arg(2)?) {
                return Err(format!("no change for project {}", id));
            }
        }
        "copy" => {
            let id = ProjectId::from(arg(1)?);
            let copy = session
                .duplicate_project(id.clone())
                .ok_or_else(|| format!("unknown project {}", id))?;
            println!("{}", copy);
        }
        "delete" => {
            let id = ProjectId::from(arg(1)?);
            if !session.delete_project(id.clone()).map_err(|e| e.to_string())? {
                return Err(format!("unknown project {}", id));
            }
        }
        "select" => {
            let id = ProjectId::from(arg(1)?);
            if session.state().project(&id).is_none() {
                tracing::warn!(project = %id, "selecting unknown project");
            }
            session.select_project(id);
        }
        "set-html" | "set-css" | "set-js" => {
            let language = language_arg(&args[0]["set-".len()..])?;
            let path = PathBuf::from(arg(1)?);
            let text = std::fs::read_to_string(&path)
                .map_err(|e| format!("{}: {}", path.display(), e))?;
            session.edit(language, text);
        }
        "show" => {
            let language = language_arg(arg(1)?)?;
            println!("{}", session.state().current_code().text(language));
        }
        "render" => {
            session.render_current().map_err(|e| e.to_string())?;
            let (ticket, _) = session
                .sandbox_mut()
                .release()
                .ok_or_else(|| "nothing rendered".to_string())?;
            println!("{}", ticket.document);
        }
        "log" => {
            session.pump();
            println!("{}", session.console());
        }
        "export" => {
            let id = ProjectId::from(arg(1)?);
            let bytes = session.export_project(&id).map_err(|e| e.to_string())?;
            let path = PathBuf::from(arg(2)?);
            std::fs::write(&path, bytes).map_err(|e| format!("{}: {}", path.display(), e))?;
        }
        "import" => {
            let path = PathBuf::from(arg(1)?);
            let bytes = std::fs::read(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
            let id = session.import_project(&bytes).map_err(|e| e.to_string())?;
            println!("{}", id);
        }
        other => return Err(format!("unknown command '{}'\n\n{}", other, USAGE)),
    }

    session.flush();
    Ok(())
}
