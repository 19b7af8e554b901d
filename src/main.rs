use clap::Parser;
use course_finder::config::{ApplyArgs, Command, CoursesArgs, OutputFormat};
use course_finder::core::application::{Applicant, UploadedFile};
use course_finder::core::listing::ListingState;
use course_finder::core::pagination::PagerLine;
use course_finder::core::wizard::WizardTransition;
use course_finder::domain::labels;
use course_finder::utils::error::ErrorSeverity;
use course_finder::utils::{logger, validation::Validate};
use course_finder::{
    ApplicationForm, CliConfig, CmsClient, CourseCatalog, FilterKey, ListingView, Result,
    StepWizard,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ course-finder failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: CliConfig) -> Result<()> {
    cli.validate()?;
    let config = cli.resolve()?;
    let client = CmsClient::from_config(&config)?;

    match cli.command {
        None => print_banner(),
        Some(Command::Labels) => print_labels(),
        Some(Command::Universities) => {
            for uni in client.fetch_universities().await? {
                println!("{:>6}  {}", uni.id, uni.name);
            }
        }
        Some(Command::Courses(args)) => run_listing(&client, &args).await?,
        Some(Command::Search) => {
            if let Some(url) = run_wizard(&client).await? {
                println!("➡️  {}", url);
                let args = CoursesArgs {
                    url: Some(url),
                    ..Default::default()
                };
                run_listing(&client, &args).await?;
            }
        }
        Some(Command::Apply(args)) => run_apply(&args)?,
    }
    Ok(())
}

fn print_banner() {
    println!("🎓 course-finder: 留学课程搜索");
    println!();
    println!("  search        分步搜索 (地点 → 学历 → 入学时间 → 院校)");
    println!("  courses       按条件浏览课程");
    println!("  universities  院校列表");
    println!("  apply         填写申请表");
    println!("  labels        查看代码对照表");
}

fn print_labels() {
    for key in [FilterKey::Location, FilterKey::Level, FilterKey::Intake] {
        println!("[{}]", key);
        for (code, label) in labels::table(key) {
            println!("  {:<14} {}", code, label);
        }
    }
}

async fn run_wizard(client: &CmsClient) -> Result<Option<String>> {
    let mut wizard = StepWizard::new();
    wizard.load_universities(client).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let (number, total, percent) = wizard.progress();
        let step = wizard.step();
        let options = wizard.options();
        let chosen = wizard.selection(wizard.current_step()).map(str::to_string);

        println!();
        println!("步骤 {} / {}  ({}%)  {}", number, total, percent, step.title);
        for (i, option) in options.iter().enumerate() {
            let marker = if chosen.as_deref() == Some(option.value.as_str()) {
                "*"
            } else {
                " "
            };
            println!(" {}{:>3}. {}", marker, i + 1, option.label);
        }
        let action = if wizard.is_last_step() { "搜索" } else { "下一步" };
        println!("输入序号选择, 回车 = {}, b = 上一步, q = 退出", action);

        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        match line.trim() {
            "q" => return Ok(None),
            "b" => wizard.previous(),
            "" => match wizard.next() {
                Ok(WizardTransition::Navigate { url }) => return Ok(Some(url)),
                Ok(WizardTransition::Advanced { .. }) => {}
                Err(e) => println!("⚠️  {}", e),
            },
            input => {
                let picked = input
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| options.get(i));
                match picked {
                    Some(option) => wizard.select_option(&option.value)?,
                    None => println!("⚠️  请输入 1-{} 之间的序号", options.len()),
                }
            }
        }
    }
}

async fn run_listing(client: &CmsClient, args: &CoursesArgs) -> Result<()> {
    let mut view = ListingView::from_url(&args.listing_url())?;
    view.load_clamped(client).await?;

    match args.format {
        OutputFormat::Json => {
            if let Some(page) = view.loaded_page() {
                println!("{}", serde_json::to_string_pretty(page)?);
            }
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            for card in view.cards() {
                writer.serialize(card)?;
            }
            writer.flush()?;
        }
        OutputFormat::Text => print_listing(&view),
    }
    Ok(())
}

fn print_listing(view: &ListingView) {
    if let ListingState::Loading = view.state() {
        println!("加载中...");
        return;
    }

    println!("{}", view.result_count_line());
    for card in view.cards() {
        println!();
        println!("📘 {}", card.name);
        println!("   学历      {}", card.level);
        println!("   大学      {}", card.university);
        println!("   学院      {}", card.faculty);
        println!("   地点      {}", card.locations);
        println!("   学制      {}", card.duration);
        println!("   学费      {}", card.fee);
        println!("   入学月份  {}", card.intakes);
        println!("   提交申请  {}", card.apply_url);
    }

    let links = view.page_links();
    if !links.is_empty() {
        println!();
        println!("‹ {} ›", PagerLine(&links));
    }
}

fn run_apply(args: &ApplyArgs) -> Result<()> {
    let mut form = ApplicationForm::from_url(&args.url)?;
    form.applicant = Applicant {
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        chinese_name: args.chinese_name.clone(),
        email: args.email.clone(),
        phone: args.phone.clone(),
        education: args.education.clone(),
        message: args.message.clone(),
    };

    let files = args
        .files
        .iter()
        .map(|path| UploadedFile::from_path(path))
        .collect::<Result<Vec<_>>>()?;
    form.add_files(files)?;

    println!("{}", form.heading());
    for file in form.files() {
        println!("  📎 {} ({})", file.name, file.display_size());
    }

    let submitted = form.submit()?;
    println!("{}", serde_json::to_string_pretty(&submitted)?);
    println!("✅ 申请已记录 (未发送至任何服务器)");
    Ok(())
}

