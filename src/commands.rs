//! Typed command catalog
//!
//! Every method here is a pure projection over
//! [`Connection::command`](crate::Connection::command): a fixed command
//! name, the caller's arguments in wire order, and a typed view of the
//! reply. No method adds wire behavior of its own.

use bytes::Bytes;
use indexmap::IndexMap;

use crate::client::Connection;
use crate::error::{RedwireError, Result};
use crate::protocol::{Arg, Reply, Value};

// =============================================================================
// Key Operations
// =============================================================================

impl Connection {
    /// Whether `key` exists
    pub fn exists(&mut self, key: impl Into<Arg>) -> Result<bool> {
        as_bool(self.command([Arg::from("EXISTS"), key.into()])?)
    }

    /// Delete a key, returning the number of keys removed
    pub fn del(&mut self, key: impl Into<Arg>) -> Result<i64> {
        self.command([Arg::from("DEL"), key.into()])?.into_integer()
    }

    /// Remaining time to live of a key in seconds; negative when the
    /// key has no expiry or does not exist
    pub fn ttl(&mut self, key: impl Into<Arg>) -> Result<i64> {
        self.command([Arg::from("TTL"), key.into()])?.into_integer()
    }

    /// Remove every key of the current database
    pub fn flushdb(&mut self) -> Result<()> {
        self.command(["FLUSHDB"])?.expect_status("OK")
    }

    /// Check server liveness
    pub fn ping(&mut self) -> Result<()> {
        self.command(["PING"])?.expect_status("PONG")
    }
}

// =============================================================================
// String Operations
// =============================================================================

impl Connection {
    /// Get the value of `key`; `None` when the key does not exist
    pub fn get(&mut self, key: impl Into<Arg>) -> Result<Option<Value>> {
        let reply = self.command([Arg::from("GET"), key.into()])?;
        self.opt_value(reply)
    }

    /// Set `key` to `value`
    pub fn set(&mut self, key: impl Into<Arg>, value: impl Into<Arg>) -> Result<()> {
        self.command([Arg::from("SET"), key.into(), value.into()])?
            .expect_status("OK")
    }

    /// Set `key` to `value` and return the previous value
    pub fn getset(
        &mut self,
        key: impl Into<Arg>,
        value: impl Into<Arg>,
    ) -> Result<Option<Value>> {
        let reply = self.command([Arg::from("GETSET"), key.into(), value.into()])?;
        self.opt_value(reply)
    }

    /// Get the values of several keys; `None` per missing key
    pub fn mget<I, K>(&mut self, keys: I) -> Result<Vec<Option<Value>>>
    where
        I: IntoIterator<Item = K>,
        K: Into<Arg>,
    {
        let reply = self.command(build_args("MGET", keys))?;
        self.opt_value_list(reply)
    }

    /// Set several keys at once
    pub fn mset<I, K, V>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Arg>,
        V: Into<Arg>,
    {
        self.command(build_pair_args("MSET", pairs))?
            .expect_status("OK")
    }

    /// Set `key` only if it does not exist; whether the key was set
    pub fn setnx(&mut self, key: impl Into<Arg>, value: impl Into<Arg>) -> Result<bool> {
        as_bool(self.command([Arg::from("SETNX"), key.into(), value.into()])?)
    }

    /// Set several keys only if none of them exist
    pub fn msetnx<I, K, V>(&mut self, pairs: I) -> Result<bool>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Arg>,
        V: Into<Arg>,
    {
        as_bool(self.command(build_pair_args("MSETNX", pairs))?)
    }

    /// Set `key` with an expiry in seconds
    pub fn setex(
        &mut self,
        key: impl Into<Arg>,
        seconds: i64,
        value: impl Into<Arg>,
    ) -> Result<()> {
        self.command([Arg::from("SETEX"), key.into(), Arg::Int(seconds), value.into()])?
            .expect_status("OK")
    }

    /// Set `key` with an expiry in milliseconds
    pub fn psetex(
        &mut self,
        key: impl Into<Arg>,
        millis: i64,
        value: impl Into<Arg>,
    ) -> Result<()> {
        self.command([Arg::from("PSETEX"), key.into(), Arg::Int(millis), value.into()])?
            .expect_status("OK")
    }

    /// Increment the integer value of `key` by one
    pub fn incr(&mut self, key: impl Into<Arg>) -> Result<i64> {
        self.command([Arg::from("INCR"), key.into()])?.into_integer()
    }

    /// Increment the integer value of `key` by `delta`
    pub fn incrby(&mut self, key: impl Into<Arg>, delta: i64) -> Result<i64> {
        self.command([Arg::from("INCRBY"), key.into(), Arg::Int(delta)])?
            .into_integer()
    }

    /// Decrement the integer value of `key` by one
    pub fn decr(&mut self, key: impl Into<Arg>) -> Result<i64> {
        self.command([Arg::from("DECR"), key.into()])?.into_integer()
    }

    /// Decrement the integer value of `key` by `delta`
    pub fn decrby(&mut self, key: impl Into<Arg>, delta: i64) -> Result<i64> {
        self.command([Arg::from("DECRBY"), key.into(), Arg::Int(delta)])?
            .into_integer()
    }

    /// Append to the string at `key`, returning the new length
    pub fn append(&mut self, key: impl Into<Arg>, value: impl Into<Arg>) -> Result<i64> {
        self.command([Arg::from("APPEND"), key.into(), value.into()])?
            .into_integer()
    }

    /// Substring of the value at `key` over the inclusive range
    pub fn substr(
        &mut self,
        key: impl Into<Arg>,
        start: i64,
        end: i64,
    ) -> Result<Option<Value>> {
        let reply =
            self.command([Arg::from("SUBSTR"), key.into(), Arg::Int(start), Arg::Int(end)])?;
        self.opt_value(reply)
    }
}

// =============================================================================
// List Operations
// =============================================================================

impl Connection {
    /// Prepend to a list, returning its new length
    pub fn lpush(&mut self, key: impl Into<Arg>, value: impl Into<Arg>) -> Result<i64> {
        self.command([Arg::from("LPUSH"), key.into(), value.into()])?
            .into_integer()
    }

    /// Append to a list, returning its new length
    pub fn rpush(&mut self, key: impl Into<Arg>, value: impl Into<Arg>) -> Result<i64> {
        self.command([Arg::from("RPUSH"), key.into(), value.into()])?
            .into_integer()
    }

    /// Length of the list at `key`
    pub fn llen(&mut self, key: impl Into<Arg>) -> Result<i64> {
        self.command([Arg::from("LLEN"), key.into()])?.into_integer()
    }

    /// Elements of the list over the inclusive range
    pub fn lrange(
        &mut self,
        key: impl Into<Arg>,
        start: i64,
        stop: i64,
    ) -> Result<Vec<Value>> {
        let reply =
            self.command([Arg::from("LRANGE"), key.into(), Arg::Int(start), Arg::Int(stop)])?;
        self.value_list(reply)
    }

    /// Trim the list to the inclusive range
    pub fn ltrim(&mut self, key: impl Into<Arg>, start: i64, stop: i64) -> Result<()> {
        self.command([Arg::from("LTRIM"), key.into(), Arg::Int(start), Arg::Int(stop)])?
            .expect_status("OK")
    }

    /// Element at `index`; `None` when out of range
    pub fn lindex(&mut self, key: impl Into<Arg>, index: i64) -> Result<Option<Value>> {
        let reply = self.command([Arg::from("LINDEX"), key.into(), Arg::Int(index)])?;
        self.opt_value(reply)
    }

    /// Overwrite the element at `index`
    pub fn lset(
        &mut self,
        key: impl Into<Arg>,
        index: i64,
        value: impl Into<Arg>,
    ) -> Result<()> {
        self.command([Arg::from("LSET"), key.into(), Arg::Int(index), value.into()])?
            .expect_status("OK")
    }

    /// Remove up to `count` occurrences of `value`, returning how many
    /// were removed
    pub fn lrem(
        &mut self,
        key: impl Into<Arg>,
        count: i64,
        value: impl Into<Arg>,
    ) -> Result<i64> {
        self.command([Arg::from("LREM"), key.into(), Arg::Int(count), value.into()])?
            .into_integer()
    }

    /// Pop from the head of the list
    pub fn lpop(&mut self, key: impl Into<Arg>) -> Result<Option<Value>> {
        let reply = self.command([Arg::from("LPOP"), key.into()])?;
        self.opt_value(reply)
    }

    /// Pop from the tail of the list
    pub fn rpop(&mut self, key: impl Into<Arg>) -> Result<Option<Value>> {
        let reply = self.command([Arg::from("RPOP"), key.into()])?;
        self.opt_value(reply)
    }

    /// Blocking head pop; `None` when `timeout` seconds elapse first.
    /// The reply pairs the originating key with the popped element.
    pub fn blpop(
        &mut self,
        key: impl Into<Arg>,
        timeout: i64,
    ) -> Result<Option<(Value, Value)>> {
        let reply = self.command([Arg::from("BLPOP"), key.into(), Arg::Int(timeout)])?;
        self.opt_pair(reply)
    }

    /// Blocking tail pop; `None` when `timeout` seconds elapse first
    pub fn brpop(
        &mut self,
        key: impl Into<Arg>,
        timeout: i64,
    ) -> Result<Option<(Value, Value)>> {
        let reply = self.command([Arg::from("BRPOP"), key.into(), Arg::Int(timeout)])?;
        self.opt_pair(reply)
    }

    /// Atomically move the tail of `source` to the head of `dest`
    pub fn rpoplpush(
        &mut self,
        source: impl Into<Arg>,
        dest: impl Into<Arg>,
    ) -> Result<Option<Value>> {
        let reply = self.command([Arg::from("RPOPLPUSH"), source.into(), dest.into()])?;
        self.opt_value(reply)
    }
}

// =============================================================================
// Set Operations
// =============================================================================

impl Connection {
    /// Add a member to a set; whether it was newly added
    pub fn sadd(&mut self, key: impl Into<Arg>, member: impl Into<Arg>) -> Result<bool> {
        as_bool(self.command([Arg::from("SADD"), key.into(), member.into()])?)
    }

    /// Remove a member from a set.
    /// Fails with [`RedwireError::NotFound`] when the member was absent.
    pub fn srem(&mut self, key: impl Into<Arg>, member: impl Into<Arg>) -> Result<()> {
        removed(self.command([Arg::from("SREM"), key.into(), member.into()])?)
    }

    /// Remove and return a random member
    pub fn spop(&mut self, key: impl Into<Arg>) -> Result<Option<Value>> {
        let reply = self.command([Arg::from("SPOP"), key.into()])?;
        self.opt_value(reply)
    }

    /// Move a member between sets; whether it was moved
    pub fn smove(
        &mut self,
        source: impl Into<Arg>,
        dest: impl Into<Arg>,
        member: impl Into<Arg>,
    ) -> Result<bool> {
        as_bool(self.command([Arg::from("SMOVE"), source.into(), dest.into(), member.into()])?)
    }

    /// Number of members in the set
    pub fn scard(&mut self, key: impl Into<Arg>) -> Result<i64> {
        self.command([Arg::from("SCARD"), key.into()])?.into_integer()
    }

    /// Whether `member` belongs to the set
    pub fn sismember(
        &mut self,
        key: impl Into<Arg>,
        member: impl Into<Arg>,
    ) -> Result<bool> {
        as_bool(self.command([Arg::from("SISMEMBER"), key.into(), member.into()])?)
    }

    /// Intersection of the given sets
    pub fn sinter<I, K>(&mut self, keys: I) -> Result<Vec<Value>>
    where
        I: IntoIterator<Item = K>,
        K: Into<Arg>,
    {
        let reply = self.command(build_args("SINTER", keys))?;
        self.value_list(reply)
    }

    /// Store the intersection of `keys` in `dest`, returning its size
    pub fn sinterstore<I, K>(&mut self, dest: impl Into<Arg>, keys: I) -> Result<i64>
    where
        I: IntoIterator<Item = K>,
        K: Into<Arg>,
    {
        self.command(build_store_args("SINTERSTORE", dest, keys))?
            .into_integer()
    }

    /// Union of the given sets
    pub fn sunion<I, K>(&mut self, keys: I) -> Result<Vec<Value>>
    where
        I: IntoIterator<Item = K>,
        K: Into<Arg>,
    {
        let reply = self.command(build_args("SUNION", keys))?;
        self.value_list(reply)
    }

    /// Store the union of `keys` in `dest`, returning its size
    pub fn sunionstore<I, K>(&mut self, dest: impl Into<Arg>, keys: I) -> Result<i64>
    where
        I: IntoIterator<Item = K>,
        K: Into<Arg>,
    {
        self.command(build_store_args("SUNIONSTORE", dest, keys))?
            .into_integer()
    }

    /// Difference of the first set against the rest
    pub fn sdiff<I, K>(&mut self, keys: I) -> Result<Vec<Value>>
    where
        I: IntoIterator<Item = K>,
        K: Into<Arg>,
    {
        let reply = self.command(build_args("SDIFF", keys))?;
        self.value_list(reply)
    }

    /// Store the difference of `keys` in `dest`, returning its size
    pub fn sdiffstore<I, K>(&mut self, dest: impl Into<Arg>, keys: I) -> Result<i64>
    where
        I: IntoIterator<Item = K>,
        K: Into<Arg>,
    {
        self.command(build_store_args("SDIFFSTORE", dest, keys))?
            .into_integer()
    }

    /// Every member of the set
    pub fn smembers(&mut self, key: impl Into<Arg>) -> Result<Vec<Value>> {
        let reply = self.command([Arg::from("SMEMBERS"), key.into()])?;
        self.value_list(reply)
    }

    /// A random member without removing it
    pub fn srandmember(&mut self, key: impl Into<Arg>) -> Result<Option<Value>> {
        let reply = self.command([Arg::from("SRANDMEMBER"), key.into()])?;
        self.opt_value(reply)
    }
}

// =============================================================================
// Sorted Set Operations
// =============================================================================

impl Connection {
    /// Add a member with a score; whether it was newly added
    pub fn zadd(
        &mut self,
        key: impl Into<Arg>,
        score: f64,
        member: impl Into<Arg>,
    ) -> Result<bool> {
        as_bool(self.command([Arg::from("ZADD"), key.into(), score_arg(score), member.into()])?)
    }

    /// Remove a member.
    /// Fails with [`RedwireError::NotFound`] when the member was absent.
    pub fn zrem(&mut self, key: impl Into<Arg>, member: impl Into<Arg>) -> Result<()> {
        removed(self.command([Arg::from("ZREM"), key.into(), member.into()])?)
    }

    /// Increment a member's score, returning the new score
    pub fn zincrby(
        &mut self,
        key: impl Into<Arg>,
        delta: f64,
        member: impl Into<Arg>,
    ) -> Result<f64> {
        let reply =
            self.command([Arg::from("ZINCRBY"), key.into(), score_arg(delta), member.into()])?;
        match reply.into_bulk()? {
            Some(payload) => parse_score(&payload),
            None => Err(RedwireError::UnexpectedReply(
                "expected a score, got nil".to_string(),
            )),
        }
    }

    /// Rank of a member, lowest score first; `None` when absent
    pub fn zrank(&mut self, key: impl Into<Arg>, member: impl Into<Arg>) -> Result<Option<i64>> {
        opt_rank(self.command([Arg::from("ZRANK"), key.into(), member.into()])?)
    }

    /// Rank of a member, highest score first; `None` when absent
    pub fn zrevrank(
        &mut self,
        key: impl Into<Arg>,
        member: impl Into<Arg>,
    ) -> Result<Option<i64>> {
        opt_rank(self.command([Arg::from("ZREVRANK"), key.into(), member.into()])?)
    }

    /// Members over the inclusive rank range, lowest score first
    pub fn zrange(
        &mut self,
        key: impl Into<Arg>,
        start: i64,
        stop: i64,
    ) -> Result<Vec<Value>> {
        let reply =
            self.command([Arg::from("ZRANGE"), key.into(), Arg::Int(start), Arg::Int(stop)])?;
        self.value_list(reply)
    }

    /// Members with their scores over the inclusive rank range
    pub fn zrange_withscores(
        &mut self,
        key: impl Into<Arg>,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(Value, f64)>> {
        let reply = self.command([
            Arg::from("ZRANGE"),
            key.into(),
            Arg::Int(start),
            Arg::Int(stop),
            Arg::from("WITHSCORES"),
        ])?;
        self.scored_list(reply)
    }

    /// Members over the inclusive rank range, highest score first
    pub fn zrevrange(
        &mut self,
        key: impl Into<Arg>,
        start: i64,
        stop: i64,
    ) -> Result<Vec<Value>> {
        let reply =
            self.command([Arg::from("ZREVRANGE"), key.into(), Arg::Int(start), Arg::Int(stop)])?;
        self.value_list(reply)
    }

    /// Members with their scores, highest score first
    pub fn zrevrange_withscores(
        &mut self,
        key: impl Into<Arg>,
        start: i64,
        stop: i64,
    ) -> Result<Vec<(Value, f64)>> {
        let reply = self.command([
            Arg::from("ZREVRANGE"),
            key.into(),
            Arg::Int(start),
            Arg::Int(stop),
            Arg::from("WITHSCORES"),
        ])?;
        self.scored_list(reply)
    }

    /// Number of members with scores in the inclusive range
    pub fn zcount(&mut self, key: impl Into<Arg>, min: f64, max: f64) -> Result<i64> {
        self.command([Arg::from("ZCOUNT"), key.into(), score_arg(min), score_arg(max)])?
            .into_integer()
    }

    /// Number of members in the sorted set
    pub fn zcard(&mut self, key: impl Into<Arg>) -> Result<i64> {
        self.command([Arg::from("ZCARD"), key.into()])?.into_integer()
    }

    /// Score of a member; `None` when absent
    pub fn zscore(
        &mut self,
        key: impl Into<Arg>,
        member: impl Into<Arg>,
    ) -> Result<Option<f64>> {
        let reply = self.command([Arg::from("ZSCORE"), key.into(), member.into()])?;
        match reply.into_bulk()? {
            Some(payload) => Ok(Some(parse_score(&payload)?)),
            None => Ok(None),
        }
    }

    /// Remove members over the inclusive rank range, returning how many
    pub fn zremrangebyrank(
        &mut self,
        key: impl Into<Arg>,
        start: i64,
        stop: i64,
    ) -> Result<i64> {
        self.command([
            Arg::from("ZREMRANGEBYRANK"),
            key.into(),
            Arg::Int(start),
            Arg::Int(stop),
        ])?
        .into_integer()
    }

    /// Remove members with scores in the inclusive range, returning how
    /// many
    pub fn zremrangebyscore(
        &mut self,
        key: impl Into<Arg>,
        min: f64,
        max: f64,
    ) -> Result<i64> {
        self.command([
            Arg::from("ZREMRANGEBYSCORE"),
            key.into(),
            score_arg(min),
            score_arg(max),
        ])?
        .into_integer()
    }
}

// =============================================================================
// Hash Operations
// =============================================================================

impl Connection {
    /// Set a hash field; whether the field was newly created
    pub fn hset(
        &mut self,
        key: impl Into<Arg>,
        field: impl Into<Arg>,
        value: impl Into<Arg>,
    ) -> Result<bool> {
        as_bool(self.command([Arg::from("HSET"), key.into(), field.into(), value.into()])?)
    }

    /// Get a hash field; `None` when absent
    pub fn hget(
        &mut self,
        key: impl Into<Arg>,
        field: impl Into<Arg>,
    ) -> Result<Option<Value>> {
        let reply = self.command([Arg::from("HGET"), key.into(), field.into()])?;
        self.opt_value(reply)
    }

    /// Get several hash fields; `None` per absent field
    pub fn hmget<I, F>(&mut self, key: impl Into<Arg>, fields: I) -> Result<Vec<Option<Value>>>
    where
        I: IntoIterator<Item = F>,
        F: Into<Arg>,
    {
        let mut args = vec![Arg::from("HMGET"), key.into()];
        args.extend(fields.into_iter().map(Into::into));
        let reply = self.command(args)?;
        self.opt_value_list(reply)
    }

    /// Set several hash fields at once
    pub fn hmset<I, F, V>(&mut self, key: impl Into<Arg>, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (F, V)>,
        F: Into<Arg>,
        V: Into<Arg>,
    {
        let mut args = vec![Arg::from("HMSET"), key.into()];
        for (field, value) in pairs {
            args.push(field.into());
            args.push(value.into());
        }
        self.command(args)?.expect_status("OK")
    }

    /// Increment the integer value of a hash field by `delta`
    pub fn hincrby(
        &mut self,
        key: impl Into<Arg>,
        field: impl Into<Arg>,
        delta: i64,
    ) -> Result<i64> {
        self.command([Arg::from("HINCRBY"), key.into(), field.into(), Arg::Int(delta)])?
            .into_integer()
    }

    /// Whether a hash field exists
    pub fn hexists(
        &mut self,
        key: impl Into<Arg>,
        field: impl Into<Arg>,
    ) -> Result<bool> {
        as_bool(self.command([Arg::from("HEXISTS"), key.into(), field.into()])?)
    }

    /// Delete a hash field; whether it existed
    pub fn hdel(&mut self, key: impl Into<Arg>, field: impl Into<Arg>) -> Result<bool> {
        as_bool(self.command([Arg::from("HDEL"), key.into(), field.into()])?)
    }

    /// Number of fields in the hash
    pub fn hlen(&mut self, key: impl Into<Arg>) -> Result<i64> {
        self.command([Arg::from("HLEN"), key.into()])?.into_integer()
    }

    /// Every field name of the hash
    pub fn hkeys(&mut self, key: impl Into<Arg>) -> Result<Vec<Value>> {
        let reply = self.command([Arg::from("HKEYS"), key.into()])?;
        self.value_list(reply)
    }

    /// Every value of the hash
    pub fn hvals(&mut self, key: impl Into<Arg>) -> Result<Vec<Value>> {
        let reply = self.command([Arg::from("HVALS"), key.into()])?;
        self.value_list(reply)
    }

    /// Every field/value pair of the hash
    ///
    /// The flat reply alternates field and value; the map preserves the
    /// wire's pair order, and a repeated field overwrites its earlier
    /// value in place.
    pub fn hgetall(&mut self, key: impl Into<Arg>) -> Result<IndexMap<Value, Value>> {
        let reply = self.command([Arg::from("HGETALL"), key.into()])?;
        let items = reply.into_array()?.unwrap_or_default();
        if items.len() % 2 != 0 {
            return Err(RedwireError::UnexpectedReply(format!(
                "odd number of elements in field/value reply: {}",
                items.len()
            )));
        }

        let mut map = IndexMap::with_capacity(items.len() / 2);
        let mut items = items.into_iter();
        while let (Some(field), Some(value)) = (items.next(), items.next()) {
            map.insert(self.bulk_value(field)?, self.bulk_value(value)?);
        }
        Ok(map)
    }
}

// =============================================================================
// Pub/Sub Operations
// =============================================================================

impl Connection {
    /// Subscribe to a channel, fire-and-forget
    ///
    /// Returns the raw subscription confirmation. The connection offers
    /// no message-consumption loop; this exists for parity with the
    /// wire surface.
    pub fn subscribe(&mut self, channel: impl Into<Arg>) -> Result<Reply> {
        self.command([Arg::from("SUBSCRIBE"), channel.into()])
    }
}

// =============================================================================
// Reply Projection Helpers
// =============================================================================

impl Connection {
    /// Optional bulk reply through the connection's encoding
    fn opt_value(&self, reply: Reply) -> Result<Option<Value>> {
        match reply.into_bulk()? {
            Some(payload) => Ok(Some(self.value(payload)?)),
            None => Ok(None),
        }
    }

    /// Array of non-nil bulk replies; a nil array projects to empty
    fn value_list(&self, reply: Reply) -> Result<Vec<Value>> {
        reply
            .into_array()?
            .unwrap_or_default()
            .into_iter()
            .map(|item| self.bulk_value(item))
            .collect()
    }

    /// Array of bulk replies where elements may be nil
    fn opt_value_list(&self, reply: Reply) -> Result<Vec<Option<Value>>> {
        reply
            .into_array()?
            .unwrap_or_default()
            .into_iter()
            .map(|item| match item.into_bulk()? {
                Some(payload) => Ok(Some(self.value(payload)?)),
                None => Ok(None),
            })
            .collect()
    }

    /// Flat array alternating member and score
    fn scored_list(&self, reply: Reply) -> Result<Vec<(Value, f64)>> {
        let items = reply.into_array()?.unwrap_or_default();
        if items.len() % 2 != 0 {
            return Err(RedwireError::UnexpectedReply(format!(
                "odd number of elements in member/score reply: {}",
                items.len()
            )));
        }

        let mut scored = Vec::with_capacity(items.len() / 2);
        let mut items = items.into_iter();
        while let (Some(member), Some(score)) = (items.next(), items.next()) {
            let score = match score.into_bulk()? {
                Some(payload) => parse_score(&payload)?,
                None => {
                    return Err(RedwireError::UnexpectedReply(
                        "expected a score, got nil".to_string(),
                    ))
                }
            };
            scored.push((self.bulk_value(member)?, score));
        }
        Ok(scored)
    }

    /// Two-element array reply, e.g. the key/element pair of a blocking
    /// pop; a nil array is `None`
    fn opt_pair(&self, reply: Reply) -> Result<Option<(Value, Value)>> {
        let items = match reply.into_array()? {
            Some(items) => items,
            None => return Ok(None),
        };
        let mut items = items.into_iter();
        match (items.next(), items.next(), items.next()) {
            (Some(first), Some(second), None) => {
                Ok(Some((self.bulk_value(first)?, self.bulk_value(second)?)))
            }
            _ => Err(RedwireError::UnexpectedReply(
                "expected a two-element reply".to_string(),
            )),
        }
    }

    /// A single non-nil bulk element of an aggregate reply
    fn bulk_value(&self, reply: Reply) -> Result<Value> {
        match reply.into_bulk()? {
            Some(payload) => self.value(payload),
            None => Err(RedwireError::UnexpectedReply(
                "unexpected nil element in aggregate reply".to_string(),
            )),
        }
    }
}

/// Integer reply compared against 1
fn as_bool(reply: Reply) -> Result<bool> {
    Ok(reply.into_integer()? == 1)
}

/// Rank replies are an integer, or a nil bulk for an absent member
fn opt_rank(reply: Reply) -> Result<Option<i64>> {
    match reply {
        Reply::Integer(i) => Ok(Some(i)),
        Reply::Bulk(None) => Ok(None),
        other => Err(RedwireError::UnexpectedReply(format!(
            "expected rank or nil, got {}",
            other.type_name()
        ))),
    }
}

/// Removal count of 0 means the value was not there
fn removed(reply: Reply) -> Result<()> {
    if reply.into_integer()? == 0 {
        Err(RedwireError::NotFound)
    } else {
        Ok(())
    }
}

/// Scores travel as text on the wire
fn score_arg(score: f64) -> Arg {
    Arg::Text(score.to_string())
}

fn parse_score(payload: &Bytes) -> Result<f64> {
    std::str::from_utf8(payload)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| {
            RedwireError::UnexpectedReply(format!(
                "score is not a number: {:?}",
                String::from_utf8_lossy(payload)
            ))
        })
}

fn build_args<I, K>(name: &str, keys: I) -> Vec<Arg>
where
    I: IntoIterator<Item = K>,
    K: Into<Arg>,
{
    let mut args = vec![Arg::from(name)];
    args.extend(keys.into_iter().map(Into::into));
    args
}

fn build_store_args<I, K>(name: &str, dest: impl Into<Arg>, keys: I) -> Vec<Arg>
where
    I: IntoIterator<Item = K>,
    K: Into<Arg>,
{
    let mut args = vec![Arg::from(name), dest.into()];
    args.extend(keys.into_iter().map(Into::into));
    args
}

fn build_pair_args<I, K, V>(name: &str, pairs: I) -> Vec<Arg>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<Arg>,
    V: Into<Arg>,
{
    let mut args = vec![Arg::from(name)];
    for (key, value) in pairs {
        args.push(key.into());
        args.push(value.into());
    }
    args
}
