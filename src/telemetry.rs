use tracing::{subscriber::set_global_default, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

/// 以bunyan格式输出JSON日志到`sink`
/// 优先使用`RUST_LOG`，未设置时使用`env_filter`
pub fn get_subscriber<Sink>(
    name: &str,
    env_filter: &str,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = BunyanFormattingLayer::new(name.into(), sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// 注册全局subscriber，只能调用一次
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    // 将`log`中的记录导入`trace`中
    // 在`trace`中显示`actix-web`和`lettre`的日志
    LogTracer::init().expect("failed to set logger.");
    set_global_default(subscriber).expect("failed to set subscriber.");
}
