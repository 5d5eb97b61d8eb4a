use crate::shared::usecase::UseCase;
use calarm_domain::{Alarm, TriggerOutcome};
use calarm_infra::CalarmContext;

/// Hands an alarm to the queue, which rings for it unless it is a duplicate
#[derive(Debug)]
pub struct TriggerAlarmUseCase {
    pub alarm: Alarm,
}

#[async_trait::async_trait(?Send)]
impl UseCase for TriggerAlarmUseCase {
    type Response = TriggerOutcome;

    type Errors = ();

    async fn execute(&mut self, ctx: &CalarmContext) -> Result<Self::Response, Self::Errors> {
        Ok(ctx.alarms.trigger(self.alarm.clone()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::{
        test_context::{setup_test_context, NOW},
        usecase::execute,
    };
    use calarm_infra::player::PlayerEvent;

    fn alarm(id: &str) -> Alarm {
        Alarm {
            id: id.into(),
            title: "Standup".into(),
            body: "Standup starts at 09:15".into(),
            account_email: "me@example.com".into(),
            event_id: None,
            sound: None,
            event_start_time: None,
            meeting_link: None,
            trigger_time: NOW,
        }
    }

    #[actix_web::main]
    #[test]
    async fn queues_alarms_in_trigger_order() {
        let t = setup_test_context();

        let first = execute(TriggerAlarmUseCase { alarm: alarm("a") }, &t.ctx).await;
        let second = execute(TriggerAlarmUseCase { alarm: alarm("b") }, &t.ctx).await;
        let again = execute(TriggerAlarmUseCase { alarm: alarm("a") }, &t.ctx).await;

        assert_eq!(
            first,
            Ok(TriggerOutcome::Enqueued {
                started_ringing: true
            })
        );
        assert_eq!(
            second,
            Ok(TriggerOutcome::Enqueued {
                started_ringing: false
            })
        );
        assert_eq!(again, Ok(TriggerOutcome::AlreadyQueued));
        assert_eq!(t.ctx.alarms.current().unwrap().id, "a");
        assert_eq!(t.player.count(PlayerEvent::SoundStarted), 1);
        assert_eq!(t.player.count(PlayerEvent::VibrationStarted), 1);
    }
}
