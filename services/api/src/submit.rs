use crate::infra::{parse_time, ConfiguredMemberStatus, ConsoleSmsSender, InMemoryRequestStore};
use chrono::NaiveTime;
use clap::Args;
use member_desk::config::AppConfig;
use member_desk::error::AppError;
use member_desk::telemetry;
use member_desk::workflows::requests::{
    BusinessHoursPolicy, Clock, FixedClock, MemberGrade, MemberRequestService, RequestServiceError,
    ServiceResult, SystemClock,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Request text to submit
    #[arg(long)]
    pub(crate) content: String,
    /// Evaluate the business-hours gate at this time of day (HH:MM[:SS]) instead of now
    #[arg(long, value_parser = parse_time)]
    pub(crate) at: Option<NaiveTime>,
    /// Override the configured member grade
    #[arg(long, value_parser = parse_grade)]
    pub(crate) grade: Option<MemberGrade>,
}

fn parse_grade(raw: &str) -> Result<MemberGrade, String> {
    MemberGrade::parse(raw)
        .ok_or_else(|| format!("unknown grade '{raw}' (expected SILVER, GOLD, PLATINUM, DIAMOND)"))
}

pub(crate) fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let SubmitArgs { content, at, grade } = args;

    let mut config = AppConfig::load()?;
    if let Some(grade) = grade {
        config.member.grade = grade;
    }
    telemetry::init(&config.telemetry)?;

    let members = Arc::new(ConfiguredMemberStatus::from_config(&config.member));
    let store = Arc::new(InMemoryRequestStore::default());
    let sms = Arc::new(ConsoleSmsSender::new(config.sms.mode));

    let policy = BusinessHoursPolicy::standard();
    let outcome = match at {
        Some(time) => submit_with(
            policy,
            Arc::new(FixedClock::new(time)),
            members,
            store,
            sms,
            &content,
        ),
        None => submit_with(policy, Arc::new(SystemClock), members, store, sms, &content),
    };

    match outcome {
        Ok(result) => {
            render_result(&result, config.member.grade);
            Ok(())
        }
        Err(err) => {
            if matches!(err, AppError::Request(RequestServiceError::NotWithinBusinessHours)) {
                eprintln!("{}", denial_message(&policy, config.member.grade));
            }
            Err(err)
        }
    }
}

fn submit_with<C: Clock + 'static>(
    policy: BusinessHoursPolicy,
    clock: Arc<C>,
    members: Arc<ConfiguredMemberStatus>,
    store: Arc<InMemoryRequestStore>,
    sms: Arc<ConsoleSmsSender>,
    content: &str,
) -> Result<ServiceResult, AppError> {
    MemberRequestService::with_policy(policy, clock, members, store, sms)
        .submit(content)
        .map_err(AppError::from)
}

fn denial_message(policy: &BusinessHoursPolicy, grade: MemberGrade) -> String {
    format!(
        "Request rejected: {} members may only submit between {} and {}",
        grade,
        policy.opens_at().format("%H:%M"),
        policy.closes_at().format("%H:%M"),
    )
}

fn render_result(result: &ServiceResult, grade: MemberGrade) {
    println!("Request {} accepted ({} member)", result.request_id, grade);
    match (
        result.notification.message_id(),
        result.notification.error_detail(),
    ) {
        (Some(message_id), _) => println!("Confirmation SMS sent (message id {message_id})"),
        (_, Some(error)) => println!("Confirmation SMS failed: {error}"),
        (None, None) => {}
    }
}
