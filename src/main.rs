// ==========================================
// 对象构造器 - 命令行入口
// ==========================================
// 按脚本走完整个向导: 选择类型 → 参数匹配 → 子对象 → 创建
//
// 用法:
//   object-constructor [type_id] [param_id[=value] ...] [+sub_id[=count] ...] [--name=名称]
//
// 示例:
//   object-constructor compressor input-pressure=0.8 output-pressure=2.75 gas-volume=3.0 +gpa-1=2
// ==========================================

use anyhow::{bail, Context};
use object_constructor::engine::{ChannelEventPublisher, MatchEvent, MatchEventType};
use object_constructor::i18n::{self, t, t_with_args};
use object_constructor::{logging, ApiError, StaticCatalog, WizardApi, WizardConfig};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// 命令行脚本
#[derive(Debug, Default)]
struct Script {
    type_id: String,
    parameters: Vec<(String, Option<String>)>,
    sub_objects: Vec<(String, Option<String>)>,
    name: Option<String>,
}

fn parse_args(args: impl Iterator<Item = String>) -> Script {
    let mut script = Script {
        type_id: "compressor".to_string(),
        ..Default::default()
    };
    let mut type_seen = false;

    for arg in args {
        if let Some(name) = arg.strip_prefix("--name=") {
            script.name = Some(name.to_string());
        } else if let Some(sub) = arg.strip_prefix('+') {
            script.sub_objects.push(split_pair(sub));
        } else if !type_seen && !arg.contains('=') {
            script.type_id = arg;
            type_seen = true;
        } else {
            script.parameters.push(split_pair(&arg));
        }
    }
    script
}

fn split_pair(raw: &str) -> (String, Option<String>) {
    match raw.split_once('=') {
        Some((k, v)) => (k.trim().to_string(), Some(v.to_string())),
        None => (raw.trim().to_string(), None),
    }
}

fn print_events(rx: &mut UnboundedReceiver<MatchEvent>) {
    while let Ok(event) = rx.try_recv() {
        match event.event_type {
            MatchEventType::MatchCountChanged => {
                println!(
                    "  {}",
                    t_with_args("matching.found", &[("count", &event.count.to_string())])
                );
            }
            MatchEventType::SingletonMatched => {
                let id = event.object_id.unwrap_or_default();
                println!("  {}", t_with_args("matching.singleton", &[("id", &id)]));
            }
            MatchEventType::NoMatch => println!("  {}", t("matching.no_match")),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = WizardConfig::load().context("加载配置失败")?;
    i18n::set_locale(&config.locale);
    let catalog: StaticCatalog = config.load_catalog().context("加载目录失败")?;

    tracing::info!(
        "{} v{} 启动: locale={}, tolerance_ratio={}",
        object_constructor::APP_NAME,
        object_constructor::VERSION,
        config.locale,
        config.tolerance_ratio
    );

    let script = parse_args(std::env::args().skip(1));
    let (publisher, mut events) = ChannelEventPublisher::new();
    let mut api = WizardApi::new(Arc::new(catalog), &config).with_publisher(Arc::new(publisher));

    // ===== 步骤 1: 类型 =====
    let object_type = api
        .object_types()
        .iter()
        .find(|t| t.id == script.type_id)
        .map(|t| t.label.clone())
        .unwrap_or_default();
    api.select_type(&script.type_id)?;
    println!("{} ({})", object_type, script.type_id);
    print_events(&mut events);

    // ===== 步骤 2: 参数 =====
    for (parameter_id, value) in &script.parameters {
        api.toggle_parameter(parameter_id)?;
        if let Some(value) = value {
            api.set_user_value(parameter_id, value)?;
        }
        let shown = api
            .parameter_selection()
            .and_then(|s| s.user_value(parameter_id))
            .unwrap_or_default()
            .to_string();
        println!("{} = {}", parameter_id, shown);
        print_events(&mut events);
    }

    if let Some(advisory) = api.advisory() {
        println!("{}", advisory);
    }
    if let Some(outcome) = api.last_match() {
        for object in &outcome.objects {
            println!("  - {}", object.name);
        }
    }

    if !api.can_advance() {
        bail!(t("wizard.navigation_blocked"));
    }
    api.next()?;

    // ===== 步骤 3: 子对象 =====
    for (sub_id, count) in &script.sub_objects {
        api.toggle_sub_object(sub_id)?;
        if let Some(count) = count {
            api.set_sub_object_count(sub_id, count)?;
        }
    }
    if let Some(name) = &script.name {
        api.set_object_name(name)?;
    }
    for sub in api.sub_object_selection().selected() {
        println!("  + {} × {}", sub.name, sub.count);
    }

    // ===== 创建 =====
    let job = api.finish()?;
    let mut progress = job.subscribe();
    let printer = tokio::spawn(async move {
        while progress.changed().await.is_ok() {
            let snapshot = *progress.borrow();
            println!(
                "{}",
                t_with_args(
                    "creation.in_progress",
                    &[("percent", &snapshot.percent.to_string())]
                )
            );
            if snapshot.is_finished() {
                break;
            }
        }
    });

    let result = job.wait().await;
    if let Err(e) = printer.await {
        tracing::debug!("进度输出任务结束异常: {}", e);
    }

    let created = match result {
        Ok(created) => created,
        Err(ApiError::CreationCancelled(_)) => {
            println!("{}", t("creation.cancelled"));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", t_with_args("creation.completed", &[("id", &created.id)]));
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}
