//! Dispatch of voice-platform requests to schedule queries.
//!
//! Requests and responses are a simplified form of the platform's JSON
//! envelopes: speech is plain text, and reminders are described for the
//! platform to create rather than created here.

use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::clock::{self, Clock};
use crate::config::Config;
use crate::error::{Result, ScheduleError};
use crate::types::{Schedule, ScheduleSet, CONQUEST, UPGRADE};
use crate::util::query::{self, ReminderPlan, ScheduleStatus, REMINDER_TIME_ZONE};
use crate::util::schedules;

pub const LAUNCH_SPEECH: &str = "What do you want!";
pub const HELP_SPEECH: &str = "You can ask me when the next weapon and armor \
    upgrade event or conquest event starts, or ask me to remind you before the \
    next one begins. So, what would you like?";
pub const GOODBYE_SPEECH: &str = "Goodbye!";
pub const ERROR_SPEECH: &str =
    "Sorry, I had trouble doing what you asked. Please try again.";
pub const REMINDERS_SCOPE: &str = "alexa::alerts:reminders:skill:readwrite";

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq,
         strum::AsRefStr, strum::EnumString)]
pub enum IntentName {
    UpgradeTimeIntent,
    ConquestTimeIntent,
    SetUpgradeTimerIntent,
    SetConquestTimerIntent,
    ChangePlatformsIntent,
    #[strum(serialize = "AMAZON.HelpIntent")]
    Help,
    #[strum(serialize = "AMAZON.CancelIntent")]
    Cancel,
    #[strum(serialize = "AMAZON.StopIntent")]
    Stop,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct Intent {
    pub name: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum RequestBody {
    LaunchRequest,
    IntentRequest { intent: Intent },
    CanFulfillIntentRequest { intent: Intent },
    SessionEndedRequest,
    #[serde(other)]
    Unsupported,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub consent_token: Option<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct RequestContext {
    #[serde(default)]
    pub permissions: Permissions,
}

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct SkillRequest {
    pub request: RequestBody,
    #[serde(default)]
    pub context: RequestContext,
}

impl SkillRequest {
    pub fn intent(name: &str) -> SkillRequest {
        SkillRequest {
            request: RequestBody::IntentRequest {
                intent: Intent { name: name.to_owned() },
            },
            context: RequestContext::default(),
        }
    }

    pub fn with_consent(mut self, token: &str) -> SkillRequest {
        self.context.permissions.consent_token = Some(token.to_owned());
        self
    }

    fn has_consent(&self) -> bool {
        self.context.permissions.consent_token.as_deref()
            .is_some_and(|token| !token.is_empty())
    }
}

/// A reminder for the platform to create.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub scheduled_time: String,
    pub time_zone_id: String,
    pub text: String,
    pub push_notification: bool,
}

impl From<&ReminderPlan> for Reminder {
    fn from(plan: &ReminderPlan) -> Reminder {
        Reminder {
            scheduled_time: plan.trigger_time.clone(),
            time_zone_id: REMINDER_TIME_ZONE.to_owned(),
            text: plan.alert_text.clone(),
            push_notification: true,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRequest {
    pub scope: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CanFulfill {
    Yes,
    No,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<String>,
    pub should_end_session: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<Reminder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_request: Option<PermissionRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_fulfill: Option<CanFulfill>,
}

impl SkillResponse {
    fn tell(speech: &str) -> SkillResponse {
        SkillResponse { speech: Some(speech.to_owned()), ..Default::default() }
    }

    fn ask(speech: &str) -> SkillResponse {
        SkillResponse {
            reprompt: Some(speech.to_owned()),
            ..SkillResponse::tell(speech)
        }
    }
}

/// Answers requests about the configured schedules.
///
/// Built once per process; every request samples the clock again.
pub struct Router {
    clock: Box<dyn Clock + Send + Sync>,
    schedules: ScheduleSet,
}

impl Router {
    pub fn new(clock: Box<dyn Clock + Send + Sync>, schedules: ScheduleSet)
    -> Router {
        Router { clock, schedules }
    }

    /// Build the clock and schedules selected by configuration.
    pub fn from_config<C>(cfg: &C) -> std::result::Result<Router, String>
    where
        C: Config + ?Sized,
    {
        let schedules = schedules::from_config(cfg)?;
        log::info!("serving {} schedules", schedules.len());
        Ok(Router::new(clock::from_config(cfg)?, schedules))
    }

    pub fn schedules(&self) -> &ScheduleSet {
        &self.schedules
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn schedule(&self, name: &str) -> Result<&Schedule> {
        self.schedules.get(name)
            .ok_or_else(|| ScheduleError::Unknown(name.to_owned()))
    }

    pub fn status(&self, name: &str) -> Result<ScheduleStatus> {
        query::status(self.schedule(name)?, self.now())
    }

    pub fn describe(&self, name: &str) -> Result<String> {
        query::describe_schedule(self.schedule(name)?, self.now())
    }

    pub fn plan_reminder(&self, name: &str) -> Result<ReminderPlan> {
        query::plan_reminder(self.schedule(name)?, self.now())
    }

    /// Handle a request.  Failures are logged and answered with an apology.
    pub fn handle(&self, req: &SkillRequest) -> SkillResponse {
        match self.dispatch(req) {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("error handling request {:?}: {e}", req.request);
                SkillResponse::ask(ERROR_SPEECH)
            },
        }
    }

    fn dispatch(&self, req: &SkillRequest) -> Result<SkillResponse> {
        log::debug!("handling {:?}", req.request);
        Ok(match &req.request {
            RequestBody::LaunchRequest => SkillResponse::ask(LAUNCH_SPEECH),
            RequestBody::IntentRequest { intent } =>
                self.handle_intent(req, &intent.name)?,
            RequestBody::CanFulfillIntentRequest { intent } => {
                let can_fulfill = match IntentName::from_str(&intent.name) {
                    Ok(IntentName::ChangePlatformsIntent) => CanFulfill::No,
                    _ => CanFulfill::Yes,
                };
                SkillResponse {
                    can_fulfill: Some(can_fulfill),
                    ..Default::default()
                }
            },
            RequestBody::SessionEndedRequest => SkillResponse::default(),
            RequestBody::Unsupported => {
                log::warn!("unsupported request type");
                SkillResponse::ask(ERROR_SPEECH)
            },
        })
    }

    fn handle_intent(&self, req: &SkillRequest, name: &str)
    -> Result<SkillResponse> {
        let Ok(intent) = IntentName::from_str(name) else {
            return Ok(SkillResponse::tell(&format!("You just triggered {name}.")))
        };
        Ok(match intent {
            IntentName::UpgradeTimeIntent =>
                SkillResponse::tell(&self.describe(UPGRADE)?),
            IntentName::ConquestTimeIntent =>
                SkillResponse::tell(&self.describe(CONQUEST)?),
            IntentName::SetUpgradeTimerIntent => self.set_timer(req, UPGRADE)?,
            IntentName::SetConquestTimerIntent => self.set_timer(req, CONQUEST)?,
            IntentName::Help => SkillResponse::ask(HELP_SPEECH),
            IntentName::Cancel | IntentName::Stop =>
                SkillResponse::tell(GOODBYE_SPEECH),
            IntentName::ChangePlatformsIntent =>
                SkillResponse::tell(&format!("You just triggered {name}.")),
        })
    }

    fn set_timer(&self, req: &SkillRequest, name: &str)
    -> Result<SkillResponse> {
        if !req.has_consent() {
            log::info!("asking for reminder permission");
            return Ok(SkillResponse {
                permission_request: Some(PermissionRequest {
                    scope: REMINDERS_SCOPE.to_owned(),
                }),
                ..Default::default()
            })
        }

        let plan = self.plan_reminder(name)?;
        log::info!("reminder for {name} scheduled at {}", plan.trigger_time);
        Ok(SkillResponse {
            should_end_session: true,
            reminder: Some(Reminder::from(&plan)),
            ..SkillResponse::tell(&plan.sentence)
        })
    }
}
