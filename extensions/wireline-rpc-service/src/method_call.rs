use crate::{RequestContext, ServiceCaller, ServiceMethod};

/// Call-site sugar over [`ServiceMethod`] + [`ServiceCaller`].
///
/// The blanket implementation below lets downstream code write
/// `Add::call(&client, (5, 7))` without touching envelopes, codecs, or the
/// transport directly.
#[async_trait::async_trait]
pub trait MethodCall: ServiceMethod + Sized + Send + Sync {
    /// Calls the method with an empty request context.
    async fn call<C>(caller: &C, args: Self::Args) -> Result<Self::Ret, C::Error>
    where
        C: ServiceCaller + Send + Sync;

    /// Calls the method with caller-supplied transport options (headers,
    /// timeout). Outgoing context middleware still runs afterwards and may
    /// override what the caller supplied.
    async fn call_with_context<C>(
        caller: &C,
        args: Self::Args,
        context: RequestContext,
    ) -> Result<Self::Ret, C::Error>
    where
        C: ServiceCaller + Send + Sync;
}

#[async_trait::async_trait]
impl<T> MethodCall for T
where
    T: ServiceMethod + Send + Sync,
    T::Args: Send + 'static,
    T::Ret: Send + 'static,
{
    async fn call<C>(caller: &C, args: Self::Args) -> Result<Self::Ret, C::Error>
    where
        C: ServiceCaller + Send + Sync,
    {
        Self::call_with_context(caller, args, RequestContext::new()).await
    }

    async fn call_with_context<C>(
        caller: &C,
        args: Self::Args,
        context: RequestContext,
    ) -> Result<Self::Ret, C::Error>
    where
        C: ServiceCaller + Send + Sync,
    {
        let args_body = T::encode_args(args)?;
        let ret_body = caller.call_method(T::NAME, args_body, context).await?;
        Ok(T::decode_ret(&ret_body)?)
    }
}
