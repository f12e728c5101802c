use actix::{Actor, Addr, Context, Handler, Message, MessageResult};
use log::debug;
use roster::{Activities, ActivityStore, Confirmation, RegistryError};

/// Registry actor. It is the sole owner of the store and handles one message
/// at a time, so each check-then-mutate runs without interleaving.
pub struct RegistryExecutor(pub Box<dyn ActivityStore + Send>);

impl RegistryExecutor {
    pub fn new<S: ActivityStore + Send + 'static>(store: S) -> Self {
        RegistryExecutor(Box::new(store))
    }

    /// Spawns the actor on the current arbiter.
    pub fn spawn<S: ActivityStore + Send + 'static>(store: S) -> Addr<Self> {
        Self::new(store).start()
    }
}

impl Actor for RegistryExecutor {
    type Context = Context<Self>;
}

pub struct ListActivities;

impl Message for ListActivities {
    type Result = Activities;
}

impl Handler<ListActivities> for RegistryExecutor {
    type Result = MessageResult<ListActivities>;

    fn handle(&mut self, _: ListActivities, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.0.list())
    }
}

pub struct Signup {
    pub activity: String,
    pub email: String,
}

impl Signup {
    pub fn new(activity: String, email: String) -> Self {
        Signup { activity, email }
    }
}

impl Message for Signup {
    type Result = Result<Confirmation, RegistryError>;
}

impl Handler<Signup> for RegistryExecutor {
    type Result = Result<Confirmation, RegistryError>;

    fn handle(&mut self, msg: Signup, _: &mut Self::Context) -> Self::Result {
        debug!("signup {} for {:?}", msg.email, msg.activity);
        self.0.signup(&msg.activity, &msg.email)
    }
}

pub struct Unregister {
    pub activity: String,
    pub email: String,
}

impl Unregister {
    pub fn new(activity: String, email: String) -> Self {
        Unregister { activity, email }
    }
}

impl Message for Unregister {
    type Result = Result<Confirmation, RegistryError>;
}

impl Handler<Unregister> for RegistryExecutor {
    type Result = Result<Confirmation, RegistryError>;

    fn handle(&mut self, msg: Unregister, _: &mut Self::Context) -> Self::Result {
        debug!("unregister {} from {:?}", msg.email, msg.activity);
        self.0.unregister(&msg.activity, &msg.email)
    }
}
