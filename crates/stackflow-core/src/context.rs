//! Orchestration context
//!
//! The [`Context`] owns every resource a program declares. Registration is
//! synchronous and returns a [`CustomResource`] handle right away; the actual
//! `new_resource` call is made on a background task once all of the resource's
//! inputs have resolved, so dependency order follows the data references
//! between resources rather than the order of declaration.

use crate::error::{CloudError, Result};
use crate::monitor::ResourceMonitor;
use crate::output::{Output, OutputError};
use crate::property::{Inputs, IntoPropertyValue, PropertyMap, get_property};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Handle to the running deployment
#[derive(Clone)]
pub struct Context {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    project: String,
    stack: String,
    monitor: Arc<dyn ResourceMonitor>,
    state: Mutex<ContextState>,
}

#[derive(Default)]
struct ContextState {
    urns: Vec<String>,
    pending: Vec<JoinHandle<std::result::Result<(), RegistrationFailure>>>,
    exports: BTreeMap<String, Output<Value>>,
    closed: bool,
}

struct RegistrationFailure {
    error: CloudError,
    /// An input never resolved, so the cause lies with a referenced resource
    upstream: bool,
}

impl Context {
    pub fn new(
        project: impl Into<String>,
        stack: impl Into<String>,
        monitor: Arc<dyn ResourceMonitor>,
    ) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                project: project.into(),
                stack: stack.into(),
                monitor,
                state: Mutex::new(ContextState::default()),
            }),
        }
    }

    /// URNs registered so far, in declaration order
    pub fn resources(&self) -> Vec<String> {
        self.lock().map(|state| state.urns.clone()).unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, ContextState>> {
        self.inner.state.lock().map_err(|_| CloudError::Poisoned)
    }

    fn urn(&self, type_token: &str, name: &str) -> String {
        format!(
            "urn:stackflow:{}::{}::{}::{}",
            self.inner.stack, self.inner.project, type_token, name
        )
    }

    /// Declare a resource
    ///
    /// Fails immediately if the URN is already taken or the run has finished.
    /// Provisioning failures surface later, through the handle's outputs and
    /// through [`Context::run`].
    pub fn register_resource(
        &self,
        type_token: &str,
        name: &str,
        inputs: Inputs,
    ) -> Result<CustomResource> {
        let urn = self.urn(type_token, name);
        let runtime = Handle::try_current().map_err(|e| CloudError::TaskFailed(e.to_string()))?;

        let mut state = self.lock()?;
        if state.closed {
            return Err(CloudError::ContextClosed);
        }
        if state.urns.contains(&urn) {
            return Err(CloudError::ResourceAlreadyExists(urn));
        }
        state.urns.push(urn.clone());

        let (id, id_resolver) = Output::pending();
        let (props, props_resolver) = Output::pending();
        let inputs = inputs.into_output();
        let monitor = self.inner.monitor.clone();
        let task_urn = urn.clone();
        let task_type = type_token.to_string();
        let task_name = name.to_string();

        tracing::debug!("Registering {}", urn);
        let handle = runtime.spawn(async move {
            let (created, upstream) = match inputs.resolve().await {
                Ok(inputs) => {
                    let created = monitor
                        .new_resource(&task_type, &task_name, inputs, "", "")
                        .await;
                    (created, false)
                }
                Err(e) => (Err(CloudError::Output(e)), true),
            };

            match created {
                Ok((provider_id, resolved)) => {
                    tracing::debug!("Created {} (ID: {})", task_urn, provider_id);
                    id_resolver.resolve(provider_id);
                    props_resolver.resolve(resolved);
                    Ok(())
                }
                Err(e) => {
                    let message = e.to_string();
                    tracing::debug!("Registration of {} failed: {}", task_urn, message);
                    id_resolver.reject(OutputError::Registration(message.clone()));
                    props_resolver.reject(OutputError::Registration(message.clone()));
                    Err(RegistrationFailure {
                        error: CloudError::Registration {
                            urn: task_urn,
                            message,
                        },
                        upstream,
                    })
                }
            }
        });
        state.pending.push(handle);

        Ok(CustomResource {
            urn,
            id,
            state: props,
        })
    }

    /// Publish a named stack output; a later export under the same name wins
    pub fn export(&self, name: impl Into<String>, value: impl IntoPropertyValue) -> Result<()> {
        let name = name.into();
        let mut state = self.lock()?;
        if state.closed {
            return Err(CloudError::ContextClosed);
        }
        if state
            .exports
            .insert(name.clone(), value.into_property_value())
            .is_some()
        {
            tracing::warn!("Output {} exported more than once; keeping the last value", name);
        }
        Ok(())
    }

    /// Invoke a provider function through the monitor
    pub async fn invoke(&self, token: &str, args: PropertyMap) -> Result<PropertyMap> {
        tracing::debug!("Invoking {}", token);
        self.inner.monitor.call(token, args, "").await
    }

    /// Run `program` to completion
    ///
    /// A program error is returned unchanged. Otherwise registrations are
    /// awaited in declaration order and the first failure aborts the run. A
    /// resource that failed only because something it references failed is
    /// reported only when no resource failed on its own. Exports that fail to
    /// resolve do not fail the run; they are reported in [`StackOutputs`].
    pub async fn run<F, Fut>(self, program: F) -> Result<StackOutputs>
    where
        F: FnOnce(Context) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        if let Err(e) = program(self.clone()).await {
            self.close();
            return Err(e);
        }
        self.wait_for_registrations().await?;
        Ok(self.resolve_exports().await)
    }

    fn close(&self) {
        if let Ok(mut state) = self.lock() {
            state.closed = true;
        }
    }

    async fn wait_for_registrations(&self) -> Result<()> {
        let pending = {
            let mut state = self.lock()?;
            state.closed = true;
            std::mem::take(&mut state.pending)
        };

        let mut first_upstream = None;
        for handle in pending {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(failure)) if failure.upstream => {
                    if first_upstream.is_none() {
                        first_upstream = Some(failure.error);
                    }
                }
                Ok(Err(failure)) => return Err(failure.error),
                Err(e) => return Err(CloudError::TaskFailed(e.to_string())),
            }
        }
        first_upstream.map_or(Ok(()), Err)
    }

    async fn resolve_exports(&self) -> StackOutputs {
        let exports = match self.lock() {
            Ok(state) => state.exports.clone(),
            Err(_) => BTreeMap::new(),
        };

        let mut outputs = StackOutputs::default();
        for (name, value) in exports {
            let resolved = value.resolve().await;
            if let Err(e) = &resolved {
                tracing::warn!("Output {} failed to resolve: {}", name, e);
            }
            outputs.entries.insert(name, resolved);
        }
        outputs
    }
}

/// A registered resource and its deferred provider-side state
#[derive(Debug, Clone)]
pub struct CustomResource {
    urn: String,
    id: Output<String>,
    state: Output<PropertyMap>,
}

impl CustomResource {
    pub fn urn(&self) -> &str {
        &self.urn
    }

    /// Provider-assigned ID
    pub fn id(&self) -> Output<String> {
        self.id.clone()
    }

    pub fn state(&self) -> Output<PropertyMap> {
        self.state.clone()
    }

    /// A single resolved property, untyped
    pub fn property(&self, key: &str) -> Output<Value> {
        let state = self.state.clone();
        let key = key.to_string();
        Output::from_future(async move {
            let props = state.resolve().await?;
            get_property(&props, &key)
        })
    }

    /// A single resolved property decoded into `T`
    pub fn property_as<T>(&self, key: &str) -> Output<T>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let value = self.property(key);
        let key = key.to_string();
        Output::from_future(async move {
            let value = value.resolve().await?;
            serde_json::from_value(value).map_err(|e| OutputError::Decode {
                key,
                reason: e.to_string(),
            })
        })
    }
}

/// Resolved stack outputs, ordered by name
#[derive(Debug, Clone, Default)]
pub struct StackOutputs {
    entries: BTreeMap<String, std::result::Result<Value, OutputError>>,
}

impl StackOutputs {
    /// The resolved value of `name`, if it resolved successfully
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).and_then(|r| r.as_ref().ok())
    }

    pub fn error(&self, name: &str) -> Option<&OutputError> {
        self.entries.get(name).and_then(|r| r.as_ref().err())
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&String, &std::result::Result<Value, OutputError>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON object of all outputs; failures are rendered as `{"error": msg}`
    pub fn to_json(&self) -> Value {
        let map: PropertyMap = self
            .entries
            .iter()
            .map(|(name, result)| {
                let value = match result {
                    Ok(value) => value.clone(),
                    Err(e) => serde_json::json!({ "error": e.to_string() }),
                };
                (name.clone(), value)
            })
            .collect();
        Value::Object(map)
    }
}
